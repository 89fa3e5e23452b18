//! Upgrade actions and their canonical encoding.

use alloy_primitives::{Address, B256, Bytes, keccak256};
use bytes::{Buf, BufMut};
use commonware_codec::{
    Encode, EncodeSize, Error as CodecError, RangeCfg, Read, ReadExt, Write,
};
use serde::{Deserialize, Serialize};

use crate::{ActionId, Idents};

#[derive(Clone, Copy, Debug)]
/// Configuration used when decoding actions from bytes.
pub struct ActionCfg {
    /// Maximum code payload size accepted by the codec.
    pub max_code_bytes: usize,
}

/// Discriminant for the two action payload forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionType {
    /// Replace the target's executable image.
    SetCode,
    /// Write one fixed-width storage cell in the target's namespace.
    SetStorage,
}

impl ActionType {
    /// Wire tag. Leads the canonical encoding so the two payload forms can
    /// never collide.
    pub const fn tag(&self) -> u8 {
        match self {
            Self::SetCode => 0,
            Self::SetStorage => 1,
        }
    }
}

/// Payload of an upgrade action.
///
/// The dual meaning of the payload (raw code vs. key/value pair) is carried
/// at the type level; nothing downstream branches on untyped bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionPayload {
    /// Raw executable bytes that replace the target's image.
    SetCode(Bytes),
    /// A fixed-width key/value pair written into the target's cell space.
    SetStorage {
        /// Storage cell key.
        key: B256,
        /// Storage cell value.
        value: B256,
    },
}

/// One atomic upgrade operation addressed to a single target.
///
/// An action's position in its bundle defines its leaf index; the index is
/// proof addressing only and implies no execution order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Target execution unit the action applies to.
    pub target: Address,
    /// Typed action payload.
    pub payload: ActionPayload,
}

impl Action {
    /// Create a code-replacement action.
    pub const fn set_code(target: Address, code: Bytes) -> Self {
        Self { target, payload: ActionPayload::SetCode(code) }
    }

    /// Create a storage-cell write action.
    pub const fn set_storage(target: Address, key: B256, value: B256) -> Self {
        Self { target, payload: ActionPayload::SetStorage { key, value } }
    }

    /// Payload discriminant.
    pub const fn action_type(&self) -> ActionType {
        match self.payload {
            ActionPayload::SetCode(_) => ActionType::SetCode,
            ActionPayload::SetStorage { .. } => ActionType::SetStorage,
        }
    }

    /// Compute the action identifier from its canonical encoding.
    pub fn id(&self) -> ActionId {
        ActionId(keccak256(self.encode()))
    }
}

impl Write for Action {
    fn write(&self, buf: &mut impl BufMut) {
        buf.put_u8(self.action_type().tag());
        buf.put_slice(self.target.as_slice());
        match &self.payload {
            ActionPayload::SetCode(code) => code.as_ref().write(buf),
            ActionPayload::SetStorage { key, value } => {
                Idents::write_b256(key, buf);
                Idents::write_b256(value, buf);
            }
        }
    }
}

impl EncodeSize for Action {
    fn encode_size(&self) -> usize {
        1 + 20
            + match &self.payload {
                ActionPayload::SetCode(code) => code.as_ref().encode_size(),
                ActionPayload::SetStorage { .. } => 64,
            }
    }
}

impl Read for Action {
    type Cfg = ActionCfg;

    fn read_cfg(buf: &mut impl Buf, cfg: &Self::Cfg) -> Result<Self, CodecError> {
        let tag = u8::read(buf)?;
        if buf.remaining() < 20 {
            return Err(CodecError::EndOfBuffer);
        }
        let mut target = [0u8; 20];
        buf.copy_to_slice(&mut target);
        let target = Address::from(target);

        let payload = match tag {
            0 => {
                let code =
                    Vec::<u8>::read_cfg(buf, &(RangeCfg::new(0..=cfg.max_code_bytes), ()))?;
                ActionPayload::SetCode(Bytes::from(code))
            }
            1 => {
                let key = Idents::read_b256(buf)?;
                let value = Idents::read_b256(buf)?;
                ActionPayload::SetStorage { key, value }
            }
            _ => return Err(CodecError::InvalidEnum(tag)),
        };

        Ok(Self { target, payload })
    }
}
