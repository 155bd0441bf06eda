use super::WriteSession;
use crate::pack::{BufferKind, ObjectValue, PackError, PackLimits, PackVersion, Value};

fn sample() -> Value {
	let inner: ObjectValue = [("flag", Value::from(true)), ("text", Value::from("y".repeat(300)))].into_iter().collect();
	let root: ObjectValue = [
		("n", Value::from(42)),
		("list", Value::from(vec![Value::from(1), Value::from(vec![Value::from(ObjectValue::new())])])),
		("inner", Value::from(inner)),
	]
	.into_iter()
	.collect();
	Value::from(root)
}

fn tight_limits() -> PackLimits {
	PackLimits {
		min_scratch: 16,
		..PackLimits::default()
	}
}

#[test]
fn capacities_start_from_request_with_scratch_floor() {
	let session = WriteSession::new(PackLimits::default(), PackVersion::V1, 10).expect("within cap");
	assert_eq!(session.main_capacity(), 10);
	assert_eq!(session.scratch_capacity(), PackLimits::MIN_SCRATCH);

	let session = WriteSession::new(PackLimits::default(), PackVersion::V1, 200_000).expect("within cap");
	assert_eq!(session.scratch_capacity(), 200_000);
}

#[test]
fn oversized_request_fails_before_encoding() {
	let err = WriteSession::new(PackLimits::default(), PackVersion::V1, PackLimits::MAX_CAPACITY + 1).expect_err("above cap");
	assert!(matches!(
		err,
		PackError::SizeExceeded {
			requested,
			max: PackLimits::MAX_CAPACITY
		} if requested == PackLimits::MAX_CAPACITY + 1
	));
}

#[test]
fn main_growth_matches_presized_output() {
	for version in [PackVersion::V1, PackVersion::V2] {
		let grown = WriteSession::new(PackLimits::default(), version, 8)
			.expect("within cap")
			.serialize(&sample())
			.expect("serialize after growth");
		let presized = WriteSession::new(PackLimits::default(), version, 100_000)
			.expect("within cap")
			.serialize(&sample())
			.expect("serialize at once");
		assert_eq!(grown, presized);
	}
}

#[test]
fn scratch_growth_matches_presized_output() {
	let grown = WriteSession::new(tight_limits(), PackVersion::V2, 16)
		.expect("within cap")
		.serialize(&sample())
		.expect("serialize after scratch growth");
	let presized = WriteSession::new(PackLimits::default(), PackVersion::V2, 100_000)
		.expect("within cap")
		.serialize(&sample())
		.expect("serialize at once");
	assert_eq!(grown, presized);
}

#[test]
fn growth_stops_at_hard_cap() {
	let limits = PackLimits {
		max_capacity: 64,
		..PackLimits::default()
	};
	let root: ObjectValue = [("s", Value::from("z".repeat(100)))].into_iter().collect();
	let err = WriteSession::new(limits, PackVersion::V2, 16)
		.expect("within cap")
		.serialize(&Value::from(root))
		.expect_err("cannot fit");
	assert!(matches!(
		err,
		PackError::Exhausted {
			buffer: BufferKind::Main,
			capacity: 64
		}
	));
}

#[test]
fn root_must_be_object() {
	let err = WriteSession::new(PackLimits::default(), PackVersion::V1, 64)
		.expect("within cap")
		.serialize(&Value::Array(Vec::new()))
		.expect_err("array root");
	assert!(matches!(err, PackError::BadParameter { .. }));
}

#[test]
fn fatal_errors_are_not_retried() {
	let root: ObjectValue = [("(bool)x", Value::from(1))].into_iter().collect();
	let err = WriteSession::new(PackLimits::default(), PackVersion::V1, 16)
		.expect("within cap")
		.serialize(&Value::from(root))
		.expect_err("directive conflict");
	assert!(matches!(err, PackError::BadType { .. }));
}
