/// Shared configuration for synthetic cloud generation and export

/// Side length of the cubic working volume, which is also the root cell size
pub const ROOT_CELL_SIZE: f64 = 10.0;

/// Centre of the working volume
pub const ROOT_CENTRE: (f64, f64, f64) = (0.0, 0.0, 0.0);

/// Number of points sampled per run unless overridden on the command line
pub const DEFAULT_POINT_COUNT: usize = 100;

/// Maximum points a node buffers directly before it subdivides
pub const NODE_CAPACITY: usize = 8;

/// Packed colours are 24-bit RGB, so the largest legal value is 0xFFFFFF
pub const COLOUR_MAX: u32 = 0xFF_FFFF;

/// Fixed filename the exported container is saved under
pub const OUTPUT_FILENAME: &str = "spheres.las";

/// Byte length of the container header
pub const HEADER_SIZE: usize = 227;

/// Byte length of one serialized point record
pub const RECORD_STRIDE: usize = 28;

/// Scale applied to coordinates before rounding into integer record fields
pub const COORD_SCALE: f64 = 100.0;

/// ASCII signature at the start of the container
pub const SIGNATURE: &[u8; 4] = b"LASF";
