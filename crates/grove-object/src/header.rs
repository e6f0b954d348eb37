use crate::{ObjectError, ObjectKind, RawObject};

/// Split a decompressed loose object into its kind and payload.
///
/// The layout is `"<type> <size>\0<payload>"`. The type word runs up to the
/// first space; the decimal size is skipped without being checked against
/// the payload length.
pub fn split_loose(data: &[u8]) -> Result<RawObject, ObjectError> {
    let space = data
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ObjectError::InvalidHeader("missing space after type"))?;
    let nul = data[space..]
        .iter()
        .position(|&b| b == 0)
        .ok_or(ObjectError::InvalidHeader("missing null terminator"))?
        + space;

    Ok(RawObject::new(
        ObjectKind::from_name(&data[..space]),
        data[nul + 1..].to_vec(),
    ))
}
