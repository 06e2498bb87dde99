use num_traits::{PrimInt, Signed, ToBytes, Unsigned};

/// Owned key bytes, ordered bytewise.
///
/// Integers are encoded so that their byte order matches their numeric order: unsigned values
/// big-endian, signed values big-endian with the sign bit flipped.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct VectorKey {
    data: Box<[u8]>,
}

impl VectorKey {
    pub fn new_from_slice(data: &[u8]) -> Self {
        Self {
            data: Box::from(data),
        }
    }

    pub fn new_from_str(s: &str) -> Self {
        Self::new_from_slice(s.as_bytes())
    }

    pub fn new_from_vec(data: Vec<u8>) -> Self {
        Self {
            data: data.into_boxed_slice(),
        }
    }

    pub fn new_from_unsigned<T>(value: T) -> Self
    where
        T: PrimInt + Unsigned + ToBytes,
    {
        Self::new_from_slice(value.to_be_bytes().as_ref())
    }

    pub fn new_from_signed<T>(value: T) -> Self
    where
        T: PrimInt + Signed + ToBytes,
    {
        let mut data = value.to_be_bytes().as_ref().to_vec();
        data[0] ^= 0x80;
        Self::new_from_vec(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reads the key back as a big-endian `u64`. Keys shorter than 8 bytes are left-padded.
    pub fn to_be_u64(&self) -> u64 {
        assert!(self.data.len() <= 8, "data length is more than 8 bytes");
        let mut arr = [0; 8];
        arr[8 - self.data.len()..].copy_from_slice(&self.data);
        u64::from_be_bytes(arr)
    }
}

impl AsRef<[u8]> for VectorKey {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<&[u8]> for VectorKey {
    fn from(data: &[u8]) -> Self {
        Self::new_from_slice(data)
    }
}
impl From<Vec<u8>> for VectorKey {
    fn from(data: Vec<u8>) -> Self {
        Self::new_from_vec(data)
    }
}
impl From<String> for VectorKey {
    fn from(data: String) -> Self {
        Self::new_from_vec(data.into_bytes())
    }
}
impl From<&String> for VectorKey {
    fn from(data: &String) -> Self {
        Self::new_from_str(data)
    }
}
impl From<&str> for VectorKey {
    fn from(data: &str) -> Self {
        Self::new_from_str(data)
    }
}

macro_rules! impl_from_unsigned {
    ( $($t:ty),* ) => {
    $(
    impl From< $t > for VectorKey
    {
        fn from(data: $t) -> Self {
            VectorKey::new_from_unsigned(data)
        }
    }
    impl From< &$t > for VectorKey
    {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    ) *
    }
}
impl_from_unsigned!(u8, u16, u32, u64, usize, u128);

macro_rules! impl_from_signed {
    ( $($t:ty),* ) => {
    $(
    impl From< $t > for VectorKey
    {
        fn from(data: $t) -> Self {
            VectorKey::new_from_signed(data)
        }
    }
    impl From< &$t > for VectorKey
    {
        fn from(data: &$t) -> Self {
            (*data).into()
        }
    }
    ) *
    }
}
impl_from_signed!(i8, i16, i32, i64, isize, i128);
