#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Protocol {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub name: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub version: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub total_volume_usd: ::prost::alloc::string::String,
    #[prost(uint64, tag="5")]
    pub total_unique_users: u64,
    #[prost(int64, tag="6")]
    pub last_update_timestamp: i64,
    #[prost(uint64, tag="7")]
    pub total_pools: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LiquidityPool {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub protocol: ::prost::alloc::string::String,
    #[prost(string, repeated, tag="3")]
    pub input_tokens: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    #[prost(string, tag="4")]
    pub token0_balance: ::prost::alloc::string::String,
    #[prost(string, tag="5")]
    pub token1_balance: ::prost::alloc::string::String,
    #[prost(string, tag="6")]
    pub output_token_supply: ::prost::alloc::string::String,
    #[prost(string, tag="7")]
    pub volume_token0: ::prost::alloc::string::String,
    #[prost(string, tag="8")]
    pub volume_token1: ::prost::alloc::string::String,
    #[prost(int64, tag="9")]
    pub created_timestamp: i64,
    #[prost(int64, tag="10")]
    pub created_block_number: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Swap {
    #[prost(string, tag="1")]
    pub id: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub block_hash: ::prost::alloc::string::String,
    #[prost(string, tag="3")]
    pub protocol: ::prost::alloc::string::String,
    #[prost(string, tag="4")]
    pub pool: ::prost::alloc::string::String,
    #[prost(string, tag="5")]
    pub from: ::prost::alloc::string::String,
    #[prost(string, tag="6")]
    pub to: ::prost::alloc::string::String,
    #[prost(string, tag="7")]
    pub token_in: ::prost::alloc::string::String,
    #[prost(string, tag="8")]
    pub token_out: ::prost::alloc::string::String,
    #[prost(string, tag="9")]
    pub amount_in: ::prost::alloc::string::String,
    #[prost(string, tag="10")]
    pub amount_out: ::prost::alloc::string::String,
    #[prost(string, tag="11")]
    pub amount_in_usd: ::prost::alloc::string::String,
    #[prost(string, tag="12")]
    pub amount_out_usd: ::prost::alloc::string::String,
    #[prost(int64, tag="13")]
    pub slot: i64,
    #[prost(int64, tag="14")]
    pub block_number: i64,
    #[prost(int64, tag="15")]
    pub timestamp: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Account {
    #[prost(string, tag="1")]
    pub pubkey: ::prost::alloc::string::String,
    #[prost(string, tag="2")]
    pub owner: ::prost::alloc::string::String,
    #[prost(uint64, tag="3")]
    pub lamports: u64,
    #[prost(uint64, tag="4")]
    pub slot: u64,
    #[prost(bool, tag="5")]
    pub executable: bool,
    #[prost(uint64, tag="6")]
    pub rent_epoch: u64,
    #[prost(bytes="vec", tag="7")]
    pub data: ::prost::alloc::vec::Vec<u8>,
}
