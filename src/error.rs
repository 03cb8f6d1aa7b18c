use thiserror::Error;

use crate::metadata::token::Token;

macro_rules! invalid_argument {
    ($param:expr) => {
        crate::Error::InvalidArgument {
            parameter: $param,
            message: format!("{} must not be empty", $param),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Member resolution itself never fails: an unknown member, or a [`MemberKind`] that selects
/// nothing, is reported as `None` or an empty list. Errors are reserved for violated
/// preconditions of the query API and for inconsistent type models handed to the
/// [`TypeBuilder`].
///
/// # Error Categories
///
/// ## Query Errors
/// - [`Error::InvalidArgument`] - A required argument (e.g. a member name) was empty
///
/// ## Type System Errors
/// - [`Error::TypeNotFound`] - Requested type not found in type system
/// - [`Error::TypeCircularity`] - A base type or interface would close an inheritance cycle
/// - [`Error::TypeBaseAlreadySet`] - The base type of a type may only be set once
/// - [`Error::TypeError`] - General type system operation error
///
/// # Examples
///
/// ```rust
/// use reflectscope::{Error, metadata::typesystem::TypeRegistry, metadata::reflection::MemberKind};
///
/// let registry = TypeRegistry::new()?;
/// let object = registry.object()?;
///
/// match registry.find_property(&object, "", MemberKind::PUBLIC) {
///     Err(Error::InvalidArgument { parameter, .. }) => assert_eq!(parameter, "property name"),
///     _ => unreachable!(),
/// }
/// # Ok::<(), reflectscope::Error>(())
/// ```
///
/// [`MemberKind`]: crate::metadata::reflection::MemberKind
/// [`TypeBuilder`]: crate::metadata::typesystem::TypeBuilder
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was empty.
    ///
    /// Raised synchronously by the query façade when a member name is empty. The
    /// `parameter` field identifies the offending argument.
    ///
    /// # Fields
    ///
    /// * `parameter` - Name of the argument that was rejected
    /// * `message` - Human readable description of the violation
    #[error("Invalid argument '{parameter}': {message}")]
    InvalidArgument {
        /// The argument that was rejected
        parameter: &'static str,
        /// The description of the violation
        message: String,
    },

    /// Failed to find type in `TypeSystem`.
    ///
    /// This error occurs when looking up a type by token that doesn't
    /// exist in the registry.
    ///
    /// The associated [`Token`] identifies which type was not found.
    #[error("Failed to find type in TypeSystem - {0}")]
    TypeNotFound(Token),

    /// Adding the requested base type or interface would create a cycle.
    ///
    /// Member resolution walks the inheritance chain until it reaches the root type,
    /// so the builder refuses any edge that would make that walk infinite.
    ///
    /// The associated [`Token`] identifies the type that would inherit from itself.
    #[error("Type would inherit from itself - {0}")]
    TypeCircularity(Token),

    /// The base type has already been assigned.
    #[error("The base type has already been set - {0}")]
    TypeBaseAlreadySet(Token),

    /// General error during `TypeSystem` usage.
    ///
    /// Covers type model construction problems such as missing names or
    /// type references that can no longer be resolved.
    #[error("{0}")]
    TypeError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_default_message() {
        let error = invalid_argument!("property name");
        match &error {
            Error::InvalidArgument { parameter, message } => {
                assert_eq!(*parameter, "property name");
                assert_eq!(message, "property name must not be empty");
            }
            _ => panic!("unexpected variant"),
        }
        assert_eq!(
            error.to_string(),
            "Invalid argument 'property name': property name must not be empty"
        );
    }

    #[test]
    fn test_type_errors_display_token() {
        let error = Error::TypeCircularity(Token::new(0x02000003));
        assert_eq!(error.to_string(), "Type would inherit from itself - 0x02000003");

        let error = Error::TypeNotFound(Token::new(0xF0000010));
        assert_eq!(error.to_string(), "Failed to find type in TypeSystem - 0xf0000010");
    }
}
