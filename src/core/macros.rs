//! Macros for declaring status enums.

/// Generate a status enum together with its `State` implementation.
///
/// The enum derives `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Debug`,
/// `Serialize` and `Deserialize`, gets an `ALL` constant listing every
/// variant in declaration order, and displays as its variant name.
///
/// # Example
///
/// ```
/// use catpoint::core::State;
/// use catpoint::state_enum;
///
/// state_enum! {
///     pub enum Siren {
///         Silent,
///         Chirp,
///         Wailing,
///     }
///     alert: [Wailing]
/// }
///
/// assert_eq!(Siren::ALL.len(), 3);
/// assert!(Siren::Wailing.is_alert());
/// assert_eq!(Siren::Chirp.to_string(), "Chirp");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(alert: [$($alert:ident),* $(,)?])?
    ) => {
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Debug,
            serde::Serialize,
            serde::Deserialize
        )]
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            #[allow(unreachable_patterns)]
            fn is_alert(&self) -> bool {
                match self {
                    $($(Self::$alert => true,)*)?
                    _ => false,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::core::State::name(self))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;

    state_enum! {
        enum TestState {
            Idle,
            Watching,
            Ringing,
        }
        alert: [Ringing]
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Idle.name(), "Idle");
        assert!(!TestState::Idle.is_alert());
        assert!(!TestState::Watching.is_alert());
        assert!(TestState::Ringing.is_alert());
    }

    #[test]
    fn state_enum_lists_all_variants_in_order() {
        assert_eq!(
            TestState::ALL,
            &[TestState::Idle, TestState::Watching, TestState::Ringing]
        );
    }

    #[test]
    fn state_enum_displays_variant_name() {
        assert_eq!(TestState::Watching.to_string(), "Watching");
    }

    #[test]
    fn state_enum_passes_attributes_through() {
        state_enum! {
            #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
            pub enum Renamed {
                FrontDoor,
            }
        }

        let json = serde_json::to_string(&Renamed::FrontDoor).unwrap();
        assert_eq!(json, "\"FRONT_DOOR\"");
    }

    #[test]
    fn state_enum_works_without_alert_list() {
        state_enum! {
            enum MinimalState {
                One,
                Two,
            }
        }

        assert!(!MinimalState::One.is_alert());
        assert!(!MinimalState::Two.is_alert());
    }
}
