use prost::Message;

pub fn decode<T: Message + Default>(buf: &[u8]) -> Result<T, prost::DecodeError> {
    T::decode(buf)
}

pub fn encode<T: Message>(msg: &T) -> Vec<u8> {
    msg.encode_to_vec()
}
