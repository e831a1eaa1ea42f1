pub(crate) mod ray;
