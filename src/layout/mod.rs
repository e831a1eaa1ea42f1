pub(crate) mod pack;
pub(crate) mod regions;
pub(crate) mod scatter;
pub(crate) mod solver;
