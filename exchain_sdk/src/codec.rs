use std::{
    any::{type_name, Any, TypeId},
    collections::HashMap,
};

use log::trace;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use types::{
    account::PubKey,
    decimal::DecCoin,
    message::Msg,
    tx::{StdFee, StdMsg, StdSignature, StdTx, TxResponse, STD_TX_TYPE},
};
use utils::encode::protobuf;

use crate::error::Error;

type EncodeFn = Box<dyn Fn(&dyn Any) -> Result<Vec<u8>, String> + Send + Sync>;
type DecodeFn = Box<dyn Fn(&[u8]) -> Result<Box<dyn Any>, String> + Send + Sync>;

/// Wire style a registered type is (de)serialized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Amino envelope `{"type": <name>, "value": <json>}`.
    Concrete,
    /// Bare JSON.
    Plain,
    /// Protobuf.
    Proto,
}

struct Registration {
    name: String,
    kind: CodecKind,
    encode: EncodeFn,
    decode: DecodeFn,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    type_name: String,
    value: Value,
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    #[serde(rename = "type")]
    type_name: &'a str,
    value: &'a T,
}

/// Registry of every type the client sends to or reads from the node.
///
/// Each type is registered once under a unique name; registering the same
/// name or the same Rust type twice panics.
#[derive(Default)]
pub struct Codec {
    names: HashMap<String, TypeId>,
    registrations: HashMap<TypeId, Registration>,
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.names.keys().collect();
        names.sort();
        f.debug_struct("Codec").field("types", &names).finish()
    }
}

fn downcast<T: 'static>(value: &dyn Any) -> Result<&T, String> {
    value
        .downcast_ref::<T>()
        .ok_or_else(|| format!("value is not a {}", type_name::<T>()))
}

impl Codec {
    pub fn new() -> Self {
        Self::default()
    }

    fn register<T: 'static>(
        &mut self,
        name: &str,
        kind: CodecKind,
        encode: EncodeFn,
        decode: DecodeFn,
    ) {
        let type_id = TypeId::of::<T>();
        if self.names.contains_key(name) {
            panic!("duplicated codec registration: {}", name);
        }
        if let Some(existing) = self.registrations.get(&type_id) {
            panic!(
                "duplicated codec registration: {} is already registered as {}",
                type_name::<T>(),
                existing.name
            );
        }

        trace!("codec register {} as {:?}", name, kind);
        self.names.insert(name.to_string(), type_id);
        self.registrations.insert(
            type_id,
            Registration {
                name: name.to_string(),
                kind,
                encode,
                decode,
            },
        );
    }

    /// Registers an interface implementation carried in an amino envelope.
    pub fn register_concrete<T>(&mut self, name: &'static str)
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let encode: EncodeFn = Box::new(move |value: &dyn Any| -> Result<Vec<u8>, String> {
            let value = downcast::<T>(value)?;
            serde_json::to_vec(&EnvelopeRef { type_name: name, value }).map_err(|e| e.to_string())
        });
        let decode: DecodeFn = Box::new(move |bytes: &[u8]| -> Result<Box<dyn Any>, String> {
            let envelope: Envelope = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
            if envelope.type_name != name {
                return Err(format!("unexpected type {}", envelope.type_name));
            }
            let value: T = serde_json::from_value(envelope.value).map_err(|e| e.to_string())?;
            Ok(Box::new(value))
        });

        self.register::<T>(name, CodecKind::Concrete, encode, decode);
    }

    pub fn register_msg<M: Msg>(&mut self) {
        self.register_concrete::<M>(M::TYPE_NAME);
    }

    pub fn register_plain<T>(&mut self, name: &str)
    where
        T: Serialize + DeserializeOwned + 'static,
    {
        let encode: EncodeFn = Box::new(|value: &dyn Any| -> Result<Vec<u8>, String> {
            serde_json::to_vec(downcast::<T>(value)?).map_err(|e| e.to_string())
        });
        let decode: DecodeFn = Box::new(|bytes: &[u8]| -> Result<Box<dyn Any>, String> {
            let value: T = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;
            Ok(Box::new(value))
        });

        self.register::<T>(name, CodecKind::Plain, encode, decode);
    }

    pub fn register_proto<T>(&mut self, name: &str)
    where
        T: prost::Message + Default + 'static,
    {
        let encode: EncodeFn = Box::new(|value: &dyn Any| -> Result<Vec<u8>, String> {
            protobuf::encode_to_bytes(downcast::<T>(value)?).map_err(|e| e.to_string())
        });
        let decode: DecodeFn = Box::new(|bytes: &[u8]| -> Result<Box<dyn Any>, String> {
            let value: T = protobuf::decode_from_bytes(bytes).map_err(|e| e.to_string())?;
            Ok(Box::new(value))
        });

        self.register::<T>(name, CodecKind::Proto, encode, decode);
    }

    fn registration<T: 'static>(&self) -> Result<&Registration, Error> {
        self.registrations
            .get(&TypeId::of::<T>())
            .ok_or_else(|| Error::unregistered_type(type_name::<T>().to_string()))
    }

    pub fn is_registered<T: 'static>(&self) -> bool {
        self.registrations.contains_key(&TypeId::of::<T>())
    }

    pub fn kind_of<T: 'static>(&self) -> Option<CodecKind> {
        self.registrations.get(&TypeId::of::<T>()).map(|r| r.kind)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn encode<T: 'static>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let registration = self.registration::<T>()?;
        (registration.encode)(value).map_err(|e| Error::codec_encode(registration.name.clone(), e))
    }

    pub fn decode<T: 'static>(&self, bytes: &[u8]) -> Result<T, Error> {
        let registration = self.registration::<T>().map_err(|_| {
            Error::codec_decode(
                type_name::<T>().to_string(),
                bytes.len(),
                "unregistered type".to_string(),
            )
        })?;

        let value = (registration.decode)(bytes)
            .map_err(|e| Error::codec_decode(registration.name.clone(), bytes.len(), e))?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            Error::codec_decode(
                registration.name.clone(),
                bytes.len(),
                "type mismatch".to_string(),
            )
        })
    }

    pub fn marshal_json<T: 'static>(&self, value: &T) -> Result<Vec<u8>, Error> {
        let registration = self.registration::<T>()?;
        if registration.kind == CodecKind::Proto {
            return Err(Error::codec_encode(
                registration.name.clone(),
                "protobuf type has no json form".to_string(),
            ));
        }
        self.encode(value)
    }

    pub fn unmarshal_json<T: 'static>(&self, bytes: &[u8]) -> Result<T, Error> {
        if self.kind_of::<T>() == Some(CodecKind::Proto) {
            return Err(Error::codec_decode(
                type_name::<T>().to_string(),
                bytes.len(),
                "protobuf type has no json form".to_string(),
            ));
        }
        self.decode(bytes)
    }

    /// Wraps a registered message into the envelope carried by `StdTx.msg`.
    pub fn to_std_msg<M: Msg>(&self, msg: &M) -> Result<StdMsg, Error> {
        let registration = self.registration::<M>()?;
        if registration.kind != CodecKind::Concrete || registration.name != M::TYPE_NAME {
            return Err(Error::codec_encode(
                M::TYPE_NAME.to_string(),
                format!("registered as {} ({:?})", registration.name, registration.kind),
            ));
        }

        Ok(StdMsg {
            msg_type: M::TYPE_NAME.to_string(),
            value: serde_json::to_value(msg).map_err(Error::serde_json)?,
        })
    }
}

/// Registers the primitives every module shares.
pub fn register_basic_codec(codec: &mut Codec) {
    codec.register_plain::<DecCoin>("okexchain/DecCoin");
    codec.register_plain::<Vec<DecCoin>>("okexchain/DecCoins");
    codec.register_plain::<StdFee>("cosmos-sdk/StdFee");
    codec.register_plain::<StdSignature>("cosmos-sdk/StdSignature");
    codec.register_concrete::<StdTx>(STD_TX_TYPE);
    codec.register_plain::<PubKey>("crypto/PubKey");
    codec.register_plain::<TxResponse>("cosmos-sdk/TxResponse");
}
