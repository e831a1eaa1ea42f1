pub(crate) mod gps;
pub(crate) mod model;
