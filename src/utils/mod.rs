pub mod hash;
pub mod webutils;
