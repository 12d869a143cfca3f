use alloc::vec::Vec;

/// Length-prefixed encoding: 8-byte big-endian length followed by the bytes.
pub fn i2osp_array(input: &[u8]) -> Vec<u8> {
    [&(input.len() as u64).to_be_bytes(), input].concat()
}

/// Number of leaves in a tree of the given depth.
pub fn capacity_for_depth(depth: u8) -> u64 {
    1u64 << depth
}

pub mod serde_helpers {
    use hex::{FromHex, ToHex};
    use serde::Deserialize;

    pub fn bytes_serialize_hex<S, T>(x: &T, s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
        T: AsRef<[u8]>,
    {
        let hex_str = &x.as_ref().encode_hex_upper::<String>();
        s.serialize_str(hex_str)
    }

    pub fn bytes_deserialize_hex<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: serde::Deserializer<'de>,
        T: AsRef<[u8]> + FromHex,
        <T as FromHex>::Error: core::fmt::Display,
    {
        let hex_str = String::deserialize(deserializer)?;
        T::from_hex(hex_str).map_err(serde::de::Error::custom)
    }

    pub fn digests_serialize_hex<S>(x: &[crate::crypto::Digest], s: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = s.serialize_seq(Some(x.len()))?;
        for digest in x {
            seq.serialize_element(&digest.encode_hex_upper::<String>())?;
        }
        seq.end()
    }

    pub fn digests_deserialize_hex<'de, D>(
        deserializer: D,
    ) -> Result<Vec<crate::crypto::Digest>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_strs = Vec::<String>::deserialize(deserializer)?;
        hex_strs
            .into_iter()
            .map(|s| <crate::crypto::Digest as FromHex>::from_hex(s).map_err(serde::de::Error::custom))
            .collect()
    }
}

#[macro_export]
macro_rules! test_config {
    ( $x:ident ) => {
        paste::paste! {
            #[test]
            fn [<$x _blake3_config>]() -> Result<(), $crate::errors::AccessControlError> {
                $x::<$crate::configuration::Blake3Configuration<$crate::configuration::ExampleLabel>>()
            }

            #[test]
            fn [<$x _sha3_config>]() -> Result<(), $crate::errors::AccessControlError> {
                $x::<$crate::configuration::Sha3Configuration<$crate::configuration::ExampleLabel>>()
            }
        }
    };
}

#[macro_export]
macro_rules! test_config_sync {
    ( $x:ident ) => {
        paste::paste! {
            #[test]
            fn [<$x _blake3_config>]() {
                $x::<$crate::configuration::Blake3Configuration<$crate::configuration::ExampleLabel>>()
            }

            #[test]
            fn [<$x _sha3_config>]() {
                $x::<$crate::configuration::Sha3Configuration<$crate::configuration::ExampleLabel>>()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_i2osp_array() {
        assert_eq!(i2osp_array(&[]), vec![0u8; 8]);
        assert_eq!(i2osp_array(&[0xaa, 0xbb]), vec![0, 0, 0, 0, 0, 0, 0, 2, 0xaa, 0xbb]);
    }

    #[test]
    fn test_capacity_for_depth() {
        assert_eq!(capacity_for_depth(2), 4);
        assert_eq!(capacity_for_depth(10), 1024);
        assert_eq!(capacity_for_depth(32), 1 << 32);
    }
}
