//! Macro for the error enums returned by domain ports.
//!
//! Every variant carries a human-readable `message`; the enum gets a
//! snake-case constructor per variant and a `message` accessor.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident => $display:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant { message: String },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = "Build a `" $variant "` error."]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                }
            )+

            /// Adapter-supplied detail, without the variant prefix.
            pub fn message(&self) -> &str {
                match self {
                    $(Self::$variant { message } => message,)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;
