mod config;
mod encode;
