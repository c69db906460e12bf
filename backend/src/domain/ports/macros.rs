//! `define_port_error!`: error enums for port traits.
//!
//! Each variant gets a `#[error]` message and a snake_case constructor whose
//! arguments take `impl Into<FieldType>`, so call sites can pass `&str` for
//! `String` fields.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Build [`" $name "::" $variant "`]."]
                    pub fn [<$variant:snake>]($($($field: impl Into<$ty>),*)?) -> Self {
                        Self::$variant $( { $($field: $field.into()),* } )?
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for each variant shape.
    define_port_error! {
        pub enum SamplePortError {
            Offline => "store offline",
            Rejected { reason: String } => "rejected: {reason}",
            Throttled { retries: u32 } => "throttled after {retries} retries",
            Failed { step: String, code: i32 } => "{step} failed with {code}",
        }
    }

    #[test]
    fn unit_variants_get_zero_argument_constructors() {
        assert_eq!(SamplePortError::offline(), SamplePortError::Offline);
        assert_eq!(SamplePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::rejected("duplicate");
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = SamplePortError::throttled(3_u32);
        assert_eq!(err.to_string(), "throttled after 3 retries");
    }

    #[test]
    fn mixed_fields_are_taken_in_declaration_order() {
        let err = SamplePortError::failed("create table", 42);
        assert_eq!(err.to_string(), "create table failed with 42");
    }
}
