//! Helper macro generating port error enums with snake_case constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use rstest::rstest;

    define_port_error! {
        pub enum StoreError {
            Rejected { message: String } => "rejected: {message}",
            Exhausted { attempts: u32 } => "gave up after {attempts} attempts",
            Conflict { key: String, version: i64 } => "conflict on {key} at v{version}",
        }
    }

    #[rstest]
    fn string_fields_accept_str() {
        let err = StoreError::rejected("duplicate");
        assert_eq!(err.to_string(), "rejected: duplicate");
    }

    #[rstest]
    fn numeric_fields_keep_their_type() {
        let err = StoreError::exhausted(3_u32);
        assert_eq!(err, StoreError::Exhausted { attempts: 3 });
        assert_eq!(err.to_string(), "gave up after 3 attempts");
    }

    #[rstest]
    fn mixed_fields_are_converted_in_order() {
        let err = StoreError::conflict("users:7", 2_i64);
        assert_eq!(err.to_string(), "conflict on users:7 at v2");
    }
}
