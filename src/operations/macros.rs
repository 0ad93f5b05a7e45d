//! Declarative helpers for response records.

/// Declares a record whose fields are all text elements.
///
/// Generates the struct with serde renames matching the XML tags and a
/// `Sanitize` impl that cleans every field.
macro_rules! record {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$fmeta:meta])* $field:ident: $tag:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $tag, default)]
                pub $field: String,
            )*
        }

        impl $crate::operations::Sanitize for $name {
            fn sanitize(&mut self) {
                $( $crate::operations::clean_text(&mut self.$field); )*
            }
        }
    };
}

/// Declares a wrapper holding a repeated child element.
macro_rules! listing {
    (
        $(#[$meta:meta])*
        pub struct $name:ident { $field:ident: $tag:literal => $item:ty $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name {
            #[serde(rename = $tag, default)]
            pub $field: Vec<$item>,
        }

        impl $crate::operations::Sanitize for $name {
            fn sanitize(&mut self) {
                self.$field
                    .iter_mut()
                    .for_each($crate::operations::Sanitize::sanitize);
            }
        }
    };
}
