mod decode_flow;
mod generate_flow;
