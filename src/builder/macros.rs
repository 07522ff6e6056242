//! Macros for ergonomic state tree construction.

/// Declare [`StateId`](crate::core::StateId) constants.
///
/// # Example
///
/// ```
/// use statetree::state_ids;
///
/// state_ids! {
///     pub ROOT = "Root";
///     IDLE = "Idle";
/// }
///
/// assert_eq!(ROOT.as_str(), "Root");
/// assert_eq!(IDLE, "Idle");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis $name:ident = $id:literal;
        )*
    ) => {
        $(
            $(#[$meta])*
            $vis const $name: $crate::core::StateId = $crate::core::StateId::from_static($id);
        )*
    };
}

#[cfg(test)]
mod tests {
    use crate::core::StateId;

    state_ids! {
        ROOT = "Root";
        /// Documented ids keep their attributes.
        PATROL = "Patrol";
    }

    #[test]
    fn state_ids_macro_generates_constants() {
        assert_eq!(ROOT, StateId::from("Root"));
        assert_eq!(PATROL.as_str(), "Patrol");
    }

    #[test]
    fn state_ids_supports_visibility() {
        mod ids {
            state_ids! {
                pub CHASE = "Chase";
            }
        }

        assert_eq!(ids::CHASE, "Chase");
    }
}
