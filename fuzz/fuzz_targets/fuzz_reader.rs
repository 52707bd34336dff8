#![no_main]

use libfuzzer_sys::fuzz_target;
use rvt::{Depth, Position, Registry, Step, ToSource, complete, locate, read};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let out = read(s);

        if let Some(tree) = &out.node {
            let range = tree.range();
            assert!(range.start <= range.end);

            // every position inside the root either maps to a node or a gap
            if let Some(found) = locate(tree, range.end, Depth::Unlimited) {
                assert!(found.node.range().contains(range.end));
            }

            // clean input prints back to something that reads the same
            if out.is_clean() {
                let printed = tree.to_source();
                let again = read(&printed);
                assert_eq!(again.node.to_source(), printed);
            }
        }

        if let Ok(step) = Step::parse(s) {
            let line = step.to_line().expect("parsed steps print back");
            assert_eq!(Step::parse(&line).ok(), Some(step));
        }

        let registry = Registry::new();
        for (line, text) in s.lines().enumerate().take(4) {
            let _ = complete(&registry, text, Position::new(line, text.chars().count()));
        }
    }
});
