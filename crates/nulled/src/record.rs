//! Sequential two-field binary records.
//!
//! A record is the bincode encoding of the value followed by the bincode encoding of the validity flag. The two
//! fields are written and read independently so a failure on the first never touches the second.
use std::io::{Read, Write};

use serde::{Serialize, de::DeserializeOwned};

use crate::error::{DecodeError, EncodeError};

pub(crate) fn write<W, T>(mut writer: W, value: &T, valid: bool) -> Result<(), EncodeError>
where
    W: Write,
    T: Serialize + ?Sized,
{
    bincode::serialize_into(&mut writer, value)?;
    bincode::serialize_into(&mut writer, &valid)?;
    Ok(())
}

pub(crate) fn read<R, T>(mut reader: R) -> Result<(T, bool), DecodeError>
where
    R: Read,
    T: DeserializeOwned,
{
    let value = bincode::deserialize_from(&mut reader)?;
    let valid = bincode::deserialize_from(&mut reader)?;
    Ok((value, valid))
}
