mod cli;
mod decode;
mod error;
mod generate;
