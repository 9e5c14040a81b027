use std::fmt;
use std::fmt::Formatter;
use crate::common::structs::custom_error::CustomError;
use crate::tracker::structs::passkey::PassKey;

impl fmt::Display for PassKey {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl std::str::FromStr for PassKey {
    type Err = CustomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 32 {
            return Err(CustomError::new("passkey must be 32 characters"));
        }
        if !bytes.iter().all(|byte| byte.is_ascii_graphic()) {
            return Err(CustomError::new("passkey must be printable ASCII"));
        }
        let mut result = PassKey([0u8; 32]);
        result.0.copy_from_slice(bytes);
        Ok(result)
    }
}

impl serde::ser::Serialize for PassKey {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from_utf8_lossy(&self.0))
    }
}

impl<'de> serde::de::Deserialize<'de> for PassKey {
    fn deserialize<D: serde::de::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        struct PassKeyVisitor;

        impl serde::de::Visitor<'_> for PassKeyVisitor {
            type Value = PassKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 32 character ASCII string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse::<PassKey>().map_err(|e| E::custom(e.message))
            }
        }
        des.deserialize_str(PassKeyVisitor)
    }
}
