//! Derive macros for todo form action enums
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates helpers for action enums (commands/events/action type)
//!
//! # Example
//!
//! ```ignore
//! use todo_form_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum FormAction {
//!     #[command]
//!     ChangeText { value: String },
//!
//!     #[event]
//!     DispatchFailed { error: String },
//! }
//!
//! // Generated methods:
//! assert!(FormAction::ChangeText { value: "a".into() }.is_command());
//! assert_eq!(FormAction::ChangeText { value: "a".into() }.action_type(), "CHANGE_TEXT");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates helper methods for action enums:
/// - `is_command()` - Returns true if this variant is a command
/// - `is_event()` - Returns true if this variant is an event
/// - `action_type()` - Returns the `SCREAMING_SNAKE_CASE` type string of the
///   variant (`AddTodo` → `"ADD_TODO"`), matching serde's
///   `rename_all = "SCREAMING_SNAKE_CASE"` so it can be used in log fields
///   and compared against serialized envelopes
///
/// # Attributes
///
/// - `#[command]` - Mark a variant as a command
/// - `#[event]` - Mark a variant as an event
///
/// Variants without either attribute are neither commands nor events but
/// still get an action type.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - A variant has both `#[command]` and `#[event]` attributes
#[proc_macro_derive(Action, attributes(command, event))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut is_command_arms = Vec::new();
    let mut is_event_arms = Vec::new();
    let mut action_type_arms = Vec::new();

    for variant in &data_enum.variants {
        let is_command = has_attribute(&variant.attrs, "command");
        let is_event = has_attribute(&variant.attrs, "event");

        if is_command && is_event {
            return syn::Error::new_spanned(variant, "Variant cannot be both #[command] and #[event]")
                .to_compile_error()
                .into();
        }

        let variant_name = &variant.ident;
        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        if is_command {
            is_command_arms.push(quote! { #pattern => true, });
        }

        if is_event {
            is_event_arms.push(quote! { #pattern => true, });
        }

        let type_name = screaming_snake_case(&variant_name.to_string());
        action_type_arms.push(quote! { #pattern => #type_name, });
    }

    // An enum with no variants cannot be matched exhaustively with arms
    let action_type_body = if action_type_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#action_type_arms)*
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns true if this action is a command
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_command(&self) -> bool {
                match self {
                    #(#is_command_arms)*
                    _ => false,
                }
            }

            /// Returns true if this action is an event
            #[must_use]
            #[allow(unreachable_patterns)]
            pub const fn is_event(&self) -> bool {
                match self {
                    #(#is_event_arms)*
                    _ => false,
                }
            }

            /// Returns the action type string (`SCREAMING_SNAKE_CASE` variant name)
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                #action_type_body
            }
        }
    };

    TokenStream::from(expanded)
}

/// Helper function to check if an attribute list contains a specific attribute
fn has_attribute(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Converts a `PascalCase` identifier the same way serde's
/// `SCREAMING_SNAKE_CASE` rename does: an underscore before every uppercase
/// letter except the first, then uppercase everything.
fn screaming_snake_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len() + 4);
    for (i, ch) in ident.char_indices() {
        if i > 0 && ch.is_uppercase() {
            out.push('_');
        }
        out.extend(ch.to_uppercase());
    }
    out
}
