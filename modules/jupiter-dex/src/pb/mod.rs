#[path = "./sf.solana.type.v1.rs"]
pub mod sol;

#[path = "./jupiter.v1.rs"]
pub mod jupiter;
