use prost::Message;

use super::error::EncodeError;

pub fn encode_to_bytes<O>(object: &O) -> Result<Vec<u8>, EncodeError>
where
    O: Sized + Message,
{
    let mut object_bytes = Vec::with_capacity(object.encoded_len());
    prost::Message::encode(object, &mut object_bytes)
        .map_err(|e| EncodeError::protobuf_encode(e))?;

    Ok(object_bytes)
}

pub fn decode_from_bytes<O>(bytes: &[u8]) -> Result<O, EncodeError>
where
    O: Message + Default,
{
    O::decode(bytes).map_err(|e| EncodeError::protobuf_decode(e))
}
