mod decoded_symbols;
mod encode_request_builder;
