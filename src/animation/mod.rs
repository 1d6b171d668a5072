pub(crate) mod driver;
pub(crate) mod ease;
pub(crate) mod interpolate;
pub(crate) mod spring;
