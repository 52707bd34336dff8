#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rvt::{CharStream, Character};

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    /// How many characters to push back after each read step.
    pushes: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let mut stream = CharStream::from(input.text.as_str());
    let mut history: Vec<Character> = Vec::new();

    for push in input.pushes {
        if let Some(c) = stream.next() {
            // a re-read character must come back at the same place
            if let Some(prev) = history.iter().find(|h| h.pos == c.pos) {
                assert_eq!(prev.ch, c.ch);
            }
            history.retain(|h| h.pos != c.pos);
            history.push(c);
        }

        for _ in 0..usize::from(push % 4).min(history.len()) {
            if let Some(last) = history.pop() {
                stream.push_back(last);
                assert_eq!(stream.position(), last.pos);
            }
        }
    }

    // draining must yield the remaining input in order
    let rest: String = stream.map(|c| c.ch).collect();
    assert!(input.text.ends_with(&rest));
});
