// Logging backend, selected by cargo feature:
// - `defmt-log`: defmt macros, for firmware builds
// - `std-log`: the `log` facade, for hosted frontends
// - neither: the macros expand to nothing

#[cfg(feature = "defmt-log")]
pub(crate) use defmt::{debug, info, trace};

#[cfg(all(feature = "std-log", not(feature = "defmt-log")))]
pub(crate) use ::log::{debug, info, trace};

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
mod silent {
    macro_rules! trace {
        ($($args:tt)*) => {};
    }

    macro_rules! debug {
        ($($args:tt)*) => {};
    }

    macro_rules! info {
        ($($args:tt)*) => {};
    }

    pub(crate) use {debug, info, trace};
}

#[cfg(not(any(feature = "defmt-log", feature = "std-log")))]
pub(crate) use silent::{debug, info, trace};
