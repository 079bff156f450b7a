pub(crate) mod decode;
pub(crate) mod model;
pub(crate) mod palette;
pub(crate) mod processor;
