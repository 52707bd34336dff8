use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    FnArg, Ident, ItemFn, LitStr, Pat, Token, Type,
    parse::{Parse, ParseStream},
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Building,
    Setup,
}

/// Options inside `#[building_block(...)]` / `#[setup_block(...)]`.
#[derive(Default)]
pub struct BlockArgs {
    pub name: Option<LitStr>,
}

impl Parse for BlockArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            match ident.to_string().as_str() {
                "name" => {
                    let name: LitStr = input.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "block name cannot be empty"));
                    }
                    args.name = Some(name);
                }
                other => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown block option: {}", other),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(args)
    }
}

struct BlockParam {
    name: String,
    ty: Type,
}

fn block_params(item: &ItemFn) -> syn::Result<Vec<BlockParam>> {
    item.sig
        .inputs
        .iter()
        .map(|input| match input {
            FnArg::Receiver(recv) => Err(syn::Error::new_spanned(
                recv,
                "blocks are free functions and cannot take `self`",
            )),
            FnArg::Typed(pat) => match pat.pat.as_ref() {
                Pat::Ident(ident) => Ok(BlockParam {
                    name: ident.ident.to_string(),
                    ty: (*pat.ty).clone(),
                }),
                other => Err(syn::Error::new_spanned(
                    other,
                    "block parameters must be plain identifiers",
                )),
            },
        })
        .collect()
}

pub fn expand(args: BlockArgs, item: ItemFn, kind: BlockKind) -> syn::Result<TokenStream> {
    if let Some(asyncness) = &item.sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "blocks must be synchronous"));
    }
    if !item.sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.sig.generics,
            "blocks cannot be generic",
        ));
    }

    let fn_ident = &item.sig.ident;
    let vis = &item.vis;
    let def_ident = format_ident!("{}_block", fn_ident);
    let block_name = args
        .name
        .map(|lit| lit.value())
        .unwrap_or_else(|| fn_ident.to_string());
    let doc = format!("Registration entry for the `{}` block.", block_name);

    let params = block_params(&item)?;
    let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let types: Vec<&Type> = params.iter().map(|p| &p.ty).collect();
    let signature = quote! {
        ::rvt::Signature::new()
            #( .positional(#names, <#types as ::rvt::BlockParam>::param_type()) )*
    };

    let body = match kind {
        BlockKind::Building => {
            let bindings: Vec<Ident> = (0..params.len())
                .map(|i| format_ident!("__arg{}", i))
                .collect();
            quote! {
                ::rvt::BlockDef::building(
                    #block_name,
                    #signature,
                    |args: ::std::vec::Vec<::rvt::Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut args = args.into_iter();
                        #( let #bindings = ::rvt::next_arg::<#types>(&mut args, #names)?; )*
                        ::rvt::IntoBlockResult::into_block_result(#fn_ident(#(#bindings),*))
                    },
                )
            }
        }
        BlockKind::Setup => {
            if params.is_empty() {
                return Err(syn::Error::new_spanned(
                    &item.sig,
                    "setup blocks take the pending steps as their first parameter",
                ));
            }
            let rest_names = &names[1..];
            let rest_types = &types[1..];
            let bindings: Vec<Ident> = (1..params.len())
                .map(|i| format_ident!("__arg{}", i))
                .collect();
            quote! {
                ::rvt::BlockDef::setup(
                    #block_name,
                    #signature,
                    |steps: ::std::vec::Vec<::rvt::Step>, args: ::std::vec::Vec<::rvt::Value>| {
                        #[allow(unused_mut, unused_variables)]
                        let mut args = args.into_iter();
                        #(
                            let #bindings =
                                ::rvt::next_arg::<#rest_types>(&mut args, #rest_names)?;
                        )*
                        ::rvt::IntoExpansion::into_expansion(#fn_ident(steps #(, #bindings)*))
                    },
                )
            }
        }
    };

    Ok(quote! {
        #item

        #[doc = #doc]
        #[allow(non_snake_case)]
        #vis fn #def_ident() -> ::rvt::BlockDef {
            #body
        }
    })
}
