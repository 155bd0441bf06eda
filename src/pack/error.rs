use std::fmt;

use thiserror::Error;

use crate::pack::wire::Status;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, PackError>;

/// Which of the two session buffers a space condition refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
	/// Buffer holding the serialized pack bytes.
	Main,
	/// Scratch buffer holding open handle records.
	Scratch,
}

impl BufferKind {
	/// Render the buffer as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Main => "pack",
			Self::Scratch => "temp",
		}
	}
}

impl fmt::Display for BufferKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Errors produced while encoding, decoding, or inspecting pack data.
#[derive(Debug, Error)]
pub enum PackError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON input or output failure.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Key has the wrong shape for its container, or is missing where a name is required.
	#[error("bad parameter: {detail}")]
	BadParameter {
		/// What was rejected.
		detail: String,
	},
	/// Value kind conflicts with an explicit directive or the primitive being used.
	#[error("bad type: {detail}")]
	BadType {
		/// What was rejected.
		detail: String,
	},
	/// Structurally invalid value tree or item stream.
	#[error("bad data: {detail}")]
	BadData {
		/// What was rejected.
		detail: String,
	},
	/// Main buffer ran out of room during one encode attempt.
	#[error("no space left in pack buffer")]
	NoSpace,
	/// Scratch buffer ran out of room during one attempt.
	#[error("no space left in temp buffer")]
	NoTempSpace,
	/// Opening a pack handle failed.
	#[error("MC Pack open failed: {status}")]
	OpenFailed {
		/// Primitive status reported by open.
		status: Status,
	},
	/// Finalizing the root pack failed.
	#[error("MC Pack close failed: {status}")]
	CloseFailed {
		/// Primitive status reported by close.
		status: Status,
	},
	/// Reading back the final pack size failed.
	#[error("MC Pack getting size failed: {status}")]
	SizeQueryFailed {
		/// Primitive status reported by the size query.
		status: Status,
	},
	/// Any other fatal primitive status.
	#[error("MC Pack returned error: {status}")]
	Wire {
		/// Primitive status.
		status: Status,
	},
	/// Growth loop reached the hard cap without succeeding.
	#[error("{buffer} buffer exhausted at hard cap of {capacity} bytes")]
	Exhausted {
		/// Buffer that could not grow further.
		buffer: BufferKind,
		/// Capacity reached.
		capacity: usize,
	},
	/// Requested initial capacity is above the hard cap.
	#[error("MC Pack size {requested} exceeded the max allowed {max}")]
	SizeExceeded {
		/// Requested capacity in bytes.
		requested: usize,
		/// Hard cap in bytes.
		max: usize,
	},
	/// Serialized input is shorter than the smallest header.
	#[error("MC Pack size {len} too small (min {min})")]
	InputTooSmall {
		/// Input length.
		len: usize,
		/// Minimum accepted length.
		min: usize,
	},
	/// Serialized input is above the hard cap.
	#[error("MC Pack size {len} exceeded the max allowed {max}")]
	InputTooLarge {
		/// Input length.
		len: usize,
		/// Hard cap in bytes.
		max: usize,
	},
	/// Value tree or item stream nests deeper than allowed.
	#[error("nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Decompression output exceeded configured safety limit.
	#[error("decompressed output exceeded limit {limit} bytes")]
	DecompressedTooLarge {
		/// Maximum allowed output bytes.
		limit: usize,
	},
}

/// Stable classification of a [`PackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// See [`PackError::Io`].
	Io,
	/// See [`PackError::Json`].
	Json,
	/// See [`PackError::BadParameter`].
	BadParameter,
	/// See [`PackError::BadType`].
	BadType,
	/// See [`PackError::BadData`].
	BadData,
	/// See [`PackError::NoSpace`].
	NoSpace,
	/// See [`PackError::NoTempSpace`].
	NoTempSpace,
	/// See [`PackError::OpenFailed`].
	OpenFailed,
	/// See [`PackError::CloseFailed`].
	CloseFailed,
	/// See [`PackError::SizeQueryFailed`].
	SizeQueryFailed,
	/// See [`PackError::Wire`].
	Wire,
	/// See [`PackError::Exhausted`].
	Exhausted,
	/// See [`PackError::SizeExceeded`].
	SizeExceeded,
	/// See [`PackError::InputTooSmall`].
	InputTooSmall,
	/// See [`PackError::InputTooLarge`].
	InputTooLarge,
	/// See [`PackError::DepthExceeded`].
	DepthExceeded,
	/// See [`PackError::DecompressedTooLarge`].
	DecompressedTooLarge,
}

impl ErrorKind {
	/// Render the kind as a stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Io => "io",
			Self::Json => "json",
			Self::BadParameter => "bad_parameter",
			Self::BadType => "bad_type",
			Self::BadData => "bad_data",
			Self::NoSpace => "no_space",
			Self::NoTempSpace => "no_temp_space",
			Self::OpenFailed => "open_failed",
			Self::CloseFailed => "close_failed",
			Self::SizeQueryFailed => "size_query_failed",
			Self::Wire => "wire",
			Self::Exhausted => "exhausted",
			Self::SizeExceeded => "size_exceeded",
			Self::InputTooSmall => "input_too_small",
			Self::InputTooLarge => "input_too_large",
			Self::DepthExceeded => "depth_exceeded",
			Self::DecompressedTooLarge => "decompressed_too_large",
		}
	}
}

impl PackError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::Io,
			Self::Json(_) => ErrorKind::Json,
			Self::BadParameter { .. } => ErrorKind::BadParameter,
			Self::BadType { .. } => ErrorKind::BadType,
			Self::BadData { .. } => ErrorKind::BadData,
			Self::NoSpace => ErrorKind::NoSpace,
			Self::NoTempSpace => ErrorKind::NoTempSpace,
			Self::OpenFailed { .. } => ErrorKind::OpenFailed,
			Self::CloseFailed { .. } => ErrorKind::CloseFailed,
			Self::SizeQueryFailed { .. } => ErrorKind::SizeQueryFailed,
			Self::Wire { .. } => ErrorKind::Wire,
			Self::Exhausted { .. } => ErrorKind::Exhausted,
			Self::SizeExceeded { .. } => ErrorKind::SizeExceeded,
			Self::InputTooSmall { .. } => ErrorKind::InputTooSmall,
			Self::InputTooLarge { .. } => ErrorKind::InputTooLarge,
			Self::DepthExceeded { .. } => ErrorKind::DepthExceeded,
			Self::DecompressedTooLarge { .. } => ErrorKind::DecompressedTooLarge,
		}
	}

	/// Map a primitive status raised while handling `key`.
	pub(crate) fn at_key(status: Status, key: Option<&str>) -> Self {
		let detail = || match key {
			Some(key) => format!("{status} at key {key:?}"),
			None => status.to_string(),
		};
		match status {
			Status::NoSpace => Self::NoSpace,
			Status::NoTempSpace => Self::NoTempSpace,
			Status::BadParam => Self::BadParameter { detail: detail() },
			Status::BadType => Self::BadType { detail: detail() },
			Status::BadData => Self::BadData { detail: detail() },
			other => Self::Wire { status: other },
		}
	}
}

impl From<Status> for PackError {
	fn from(status: Status) -> Self {
		Self::at_key(status, None)
	}
}
