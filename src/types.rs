//! Physical type model: the scalar wire types Parquet columns are made of.

/// A type that can be read/written as a fixed-size little/big-endian byte
/// sequence. Implemented for the fixed-width physical types; `ByteArray` and
/// `FixedLenByteArray` are handled separately since they're variable-length
/// or parameterized by length.
pub trait NativeType: Copy + std::fmt::Debug + Send + Sync + 'static {
    type Bytes: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_le_bytes(&self) -> Self::Bytes;
    fn to_be_bytes(&self) -> Self::Bytes;
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! native {
    ($type:ty, $n:expr) => {
        impl NativeType for $type {
            type Bytes = [u8; $n];

            #[inline]
            fn to_le_bytes(&self) -> Self::Bytes {
                <$type>::to_le_bytes(*self)
            }

            #[inline]
            fn to_be_bytes(&self) -> Self::Bytes {
                <$type>::to_be_bytes(*self)
            }

            #[inline]
            fn from_le_bytes(bytes: Self::Bytes) -> Self {
                <$type>::from_le_bytes(bytes)
            }

            #[inline]
            fn from_be_bytes(bytes: Self::Bytes) -> Self {
                <$type>::from_be_bytes(bytes)
            }
        }
    };
}

native!(i32, 4);
native!(i64, 8);
native!(f32, 4);
native!(f64, 8);

/// The 12-byte legacy INT96 physical type, used by some writers to encode
/// timestamps as (nanoseconds-of-day, Julian day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Int96(pub [u32; 3]);

const JULIAN_DAY_UNIX_EPOCH: i64 = 2_440_588;
const NANOS_PER_DAY: i64 = 86_400_000_000_000;

impl Int96 {
    pub fn from_le_bytes(bytes: [u8; 12]) -> Self {
        let lo = u32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let mid = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let julian_day = u32::from_le_bytes(bytes[8..12].try_into().unwrap());
        Int96([lo, mid, julian_day])
    }

    /// Converts the legacy (nanos-of-day, Julian day) pair into nanoseconds
    /// since the Unix epoch.
    pub fn to_i64_nanos(self) -> i64 {
        let nanos_of_day = (self.0[0] as i64) | ((self.0[1] as i64) << 32);
        let julian_day = self.0[2] as i64;
        (julian_day - JULIAN_DAY_UNIX_EPOCH) * NANOS_PER_DAY + nanos_of_day
    }

    /// Converts to a UTC instant, the usual interpretation of INT96 columns
    /// written by legacy (Impala-era) writers as timestamps.
    pub fn to_timestamp(self) -> crate::error::Result<chrono::DateTime<chrono::Utc>> {
        let nanos = self.to_i64_nanos();
        const NANOS_PER_SEC: i64 = 1_000_000_000;
        chrono::DateTime::from_timestamp(nanos.div_euclid(NANOS_PER_SEC), nanos.rem_euclid(NANOS_PER_SEC) as u32)
            .ok_or_else(|| malformed_err!("int96 timestamp out of range"))
    }
}

/// The physical (on-wire) type of a primitive Parquet column, independent of
/// any logical annotation layered on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalType {
    Boolean,
    Int32,
    Int64,
    Int96,
    Float,
    Double,
    ByteArray,
    FixedLenByteArray(usize),
}

/// Time/timestamp unit, shared by `LogicalType::Time`/`Timestamp` the way
/// the upstream Thrift `LogicalType::TIME`/`TIMESTAMP` variants share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Millis,
    Micros,
}

/// A logical annotation layered on top of a primitive type, narrowing how
/// its raw bytes should be interpreted. Named and shaped after the
/// upstream project's Thrift-derived `LogicalType`, re-expressed without a
/// Thrift dependency since footer parsing is out of this core's scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    /// `ByteArray` holds UTF-8 text.
    Utf8,
    /// `Int32`/`Int64`/`ByteArray`/`FixedLenByteArray` holds a fixed-point
    /// decimal with this precision and scale.
    Decimal { precision: u32, scale: u32 },
    /// `Int32` holds a day count since the Unix epoch.
    Date,
    /// `Int32`/`Int64` holds a time-of-day count in `unit`.
    Time { unit: TimeUnit },
    /// `Int64` (or `Int96` for the legacy encoding) holds an instant since
    /// the Unix epoch in `unit`; `is_adjusted_to_utc` distinguishes instants
    /// (true) from civil/local timestamps (false).
    Timestamp { unit: TimeUnit, is_adjusted_to_utc: bool },
    /// `FixedLenByteArray(12)` holds a (months, days, millis) interval.
    Interval,
    /// `ByteArray` holds one member of an enumerated set of string values.
    Enum,
}

/// Converts a `DATE` logical value (days since the Unix epoch) into a
/// calendar date.
pub fn date_from_days(days: i32) -> crate::error::Result<chrono::NaiveDate> {
    chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .checked_add_signed(chrono::Duration::days(days as i64))
        .ok_or_else(|| malformed_err!("date value {} is out of range", days))
}

/// Converts a `TIMESTAMP` logical value into a UTC instant, per `unit`.
/// `is_adjusted_to_utc` is not modeled further here (this core treats both
/// adjusted and unadjusted timestamps as the same epoch-relative count,
/// leaving timezone rebasing to the caller); it is carried on `LogicalType`
/// so a caller can act on it.
pub fn timestamp_from_int64(value: i64, unit: TimeUnit) -> crate::error::Result<chrono::DateTime<chrono::Utc>> {
    match unit {
        TimeUnit::Millis => chrono::DateTime::from_timestamp_millis(value),
        TimeUnit::Micros => chrono::DateTime::from_timestamp_micros(value),
    }
    .ok_or_else(|| malformed_err!("timestamp value {} is out of range", value))
}
