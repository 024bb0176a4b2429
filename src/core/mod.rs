pub mod device;
pub mod framer;
pub mod outcome;
