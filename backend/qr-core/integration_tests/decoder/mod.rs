mod retry;
mod service;
