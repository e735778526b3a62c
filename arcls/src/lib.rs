extern crate arcnav;
extern crate clap;

pub mod cli;
pub mod error;
pub mod tree;
pub mod utils;
