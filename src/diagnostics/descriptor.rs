//! # Descriptors: the static binding between an identifier and a signature.
//!
//! A [`Descriptor`] ties a diagnostic's [`Code`] to its argument signature
//! and a human-readable description. The signature is a tuple type
//! implementing [`ArgumentPack`], so publishing with the wrong arity or
//! types is a compile error, never a runtime check.
//!
//! Descriptors are typically constructed once at `static` scope from a
//! literal identifier:
//!
//! ```
//! use diagvisor::Descriptor;
//!
//! static OUT_OF_RANGE: Descriptor<(f32, f32)> =
//!     Descriptor::new("OUT_OF_RANGE", "Measured value outside limits");
//!
//! assert_eq!(OUT_OF_RANGE.code().to_string(), "OUT_OF_RANGE");
//! assert_eq!(OUT_OF_RANGE.arity(), 2);
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::code::Code;
use crate::diagnostics::argument::Argument;
use crate::error::IdentifierError;

/// A tuple of values publishable as a diagnostic's argument list.
///
/// Implemented for tuples of up to eight elements whose members convert
/// [`Into<Argument>`]. The empty tuple describes an argument-less
/// diagnostic.
pub trait ArgumentPack {
    /// Number of arguments in the pack.
    const ARITY: usize;

    /// Converts the pack into argument cells, in declaration order.
    fn into_arguments(self) -> Box<[Argument]>;
}

macro_rules! count_idents {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_idents!($($tail)*) };
}

macro_rules! impl_argument_pack {
    ($($name:ident),*) => {
        impl<$($name),*> ArgumentPack for ($($name,)*)
        where
            $($name: Into<Argument>),*
        {
            const ARITY: usize = count_idents!($($name)*);

            #[allow(non_snake_case)]
            fn into_arguments(self) -> Box<[Argument]> {
                let ($($name,)*) = self;
                Box::new([$($name.into()),*])
            }
        }
    };
}

impl_argument_pack!();
impl_argument_pack!(A1);
impl_argument_pack!(A1, A2);
impl_argument_pack!(A1, A2, A3);
impl_argument_pack!(A1, A2, A3, A4);
impl_argument_pack!(A1, A2, A3, A4, A5);
impl_argument_pack!(A1, A2, A3, A4, A5, A6);
impl_argument_pack!(A1, A2, A3, A4, A5, A6, A7);
impl_argument_pack!(A1, A2, A3, A4, A5, A6, A7, A8);

/// Immutable binding of {identifier code, argument signature, description}.
///
/// `A` is the argument signature; it only marks the type and occupies no
/// storage. Descriptors are plain values: `Copy`, comparable by code.
pub struct Descriptor<A> {
    code: Code,
    description: &'static str,
    signature: PhantomData<fn(A)>,
}

impl<A: ArgumentPack> Descriptor<A> {
    /// Creates a descriptor from a literal identifier.
    ///
    /// `const`-constructible; an invalid identifier fails the build when
    /// used in a `const`/`static` initializer.
    pub const fn new(identifier: &'static str, description: &'static str) -> Self {
        Self {
            code: Code::literal(identifier),
            description,
            signature: PhantomData,
        }
    }

    /// Creates a descriptor from a runtime-supplied identifier.
    pub fn try_new(identifier: &str, description: &'static str) -> Result<Self, IdentifierError> {
        Ok(Self {
            code: Code::new(identifier)?,
            description,
            signature: PhantomData,
        })
    }

    /// The identifier code.
    #[inline]
    pub const fn code(&self) -> Code {
        self.code
    }

    /// The human-readable description.
    #[inline]
    pub const fn description(&self) -> &'static str {
        self.description
    }

    /// Number of arguments the signature binds.
    #[inline]
    pub const fn arity(&self) -> usize {
        A::ARITY
    }
}

impl<A> Clone for Descriptor<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Descriptor<A> {}

impl<A> fmt::Debug for Descriptor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("code", &self.code)
            .field("description", &self.description)
            .finish()
    }
}
