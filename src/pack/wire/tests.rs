use super::{HANDLE_SIZE, ItemKind, Pack, PackReader, PackWriter, Status};
use crate::pack::PackVersion;

fn write_pack(version: PackVersion, build: impl FnOnce(&mut Pack<'_, '_>)) -> Vec<u8> {
	let mut buf = vec![0_u8; 512];
	let mut scratch = vec![0_u8; HANDLE_SIZE * 8];
	let mut writer = PackWriter::open(version, &mut buf, &mut scratch).expect("writer opens");
	build(&mut writer.root());
	writer.close().expect("writer closes");
	let size = writer.size().expect("size is known after close");
	buf.truncate(size);
	buf
}

fn top_level(bytes: &[u8]) -> Vec<(ItemKind, Option<String>, Vec<u8>)> {
	let mut scratch = vec![0_u8; HANDLE_SIZE * 8];
	let mut reader = PackReader::open(bytes, &mut scratch).expect("reader opens");
	let root = reader.root();
	let mut out = Vec::new();
	let mut cursor = root.first_item();
	loop {
		let item = match cursor {
			Ok(item) => item,
			Err(Status::NotFound) => break,
			Err(status) => panic!("unexpected status {status:?}"),
		};
		out.push((item.kind, item.key.map(str::to_owned), item.value.to_vec()));
		cursor = root.next_item(&item);
	}
	out
}

#[test]
fn v2_layout_is_stable() {
	let bytes = write_pack(PackVersion::V2, |root| root.put_i32(Some("a"), 1).expect("put succeeds"));
	assert_eq!(
		bytes,
		[0x10, 0x00, 8, 0, 0, 0, 1, 0, 0, 0, 0x14, 2, b'a', 0, 1, 0, 0, 0]
	);
}

#[test]
fn v1_stream_leads_with_header_item() {
	let bytes = write_pack(PackVersion::V1, |root| root.put_i32(Some("a"), 1).expect("put succeeds"));
	assert!(bytes.starts_with(b"PCK\x01"));
	assert_eq!(bytes.len(), 26);

	let items = top_level(&bytes);
	assert_eq!(items.len(), 2);
	assert_eq!(items[0], (ItemKind::PackHeader, None, 1_u32.to_le_bytes().to_vec()));
	assert_eq!(items[1], (ItemKind::Int32, Some("a".to_owned()), 1_i32.to_le_bytes().to_vec()));

	let mut scratch = vec![0_u8; HANDLE_SIZE];
	let reader = PackReader::open(&bytes, &mut scratch).expect("reader opens");
	assert_eq!(reader.version(), PackVersion::V1);
}

#[test]
fn v2_uses_short_lengths_and_v1_long() {
	let short = write_pack(PackVersion::V2, |root| root.put_str(Some("k"), b"hi").expect("put succeeds"));
	assert_eq!(&short[10..], [0xD0, 2, b'k', 0, 3, b'h', b'i', 0]);

	let long = write_pack(PackVersion::V1, |root| root.put_str(Some("k"), b"hi").expect("put succeeds"));
	assert_eq!(&long[18..], [0x50, 2, b'k', 0, 3, 0, 0, 0, b'h', b'i', 0]);

	for bytes in [short, long] {
		let items = top_level(&bytes);
		let last = items.last().expect("one user item");
		assert_eq!(last.0, ItemKind::Str);
		assert_eq!(last.2, b"hi\0");
	}
}

#[test]
fn long_raw_in_v2_switches_to_u32_length() {
	let payload = vec![7_u8; 300];
	let bytes = write_pack(PackVersion::V2, |root| root.put_raw(Some("r"), &payload).expect("put succeeds"));
	assert_eq!(bytes[10], 0x60);
	let items = top_level(&bytes);
	assert_eq!(items[0].0, ItemKind::Raw);
	assert_eq!(items[0].2, payload);
}

#[test]
fn object_keys_are_validated() {
	write_pack(PackVersion::V2, |root| {
		assert_eq!(root.put_i32(None, 1), Err(Status::BadParam));
		assert_eq!(root.put_i32(Some(""), 1), Err(Status::BadParam));
		assert_eq!(root.put_i32(Some("a\0b"), 1), Err(Status::BadParam));
		let long = "k".repeat(255);
		assert_eq!(root.put_null(Some(&long)), Err(Status::BadParam));
		root.put_null(Some(&long[..254])).expect("254-byte key fits");
	});
}

#[test]
fn array_elements_take_no_key() {
	let bytes = write_pack(PackVersion::V2, |root| {
		let mut list = root.put_array(Some("list")).expect("array opens");
		assert_eq!(list.kind(), ItemKind::Array);
		assert_eq!(list.put_bool(Some("x"), true), Err(Status::BadParam));
		list.put_bool(None, true).expect("keyless element");
		list.put_null(None).expect("keyless element");
		list.finish().expect("array finishes");
	});

	let mut scratch = vec![0_u8; HANDLE_SIZE * 4];
	let mut reader = PackReader::open(&bytes, &mut scratch).expect("reader opens");
	let mut root = reader.root();
	let item = root.first_item().expect("array item");
	assert_eq!(item.kind, ItemKind::Array);
	assert_eq!(item.count, 2);
	let list = root.sub_pack(&item).expect("sub view opens");
	let first = list.first_item().expect("first element");
	assert_eq!((first.kind, first.key, first.value), (ItemKind::Bool, None, &[1_u8][..]));
	let second = list.next_item(&first).expect("second element");
	assert_eq!(second.kind, ItemKind::Null);
	assert_eq!(list.next_item(&second).map(|item| item.kind), Err(Status::NotFound));
}

#[test]
fn text_with_nul_is_bad_type() {
	write_pack(PackVersion::V2, |root| {
		assert_eq!(root.put_str(Some("s"), b"a\0b"), Err(Status::BadType));
		root.put_raw(Some("s"), b"a\0b").expect("raw accepts NUL");
	});
}

#[test]
fn full_main_buffer_is_no_space() {
	let mut scratch = vec![0_u8; HANDLE_SIZE * 2];
	let mut tiny = [0_u8; 5];
	assert!(matches!(PackWriter::open(PackVersion::V2, &mut tiny, &mut scratch), Err(Status::NoSpace)));

	let mut buf = [0_u8; 12];
	let mut writer = PackWriter::open(PackVersion::V2, &mut buf, &mut scratch).expect("header fits");
	assert_eq!(writer.root().put_i32(Some("a"), 1), Err(Status::NoSpace));
}

#[test]
fn full_scratch_is_no_temp_space() {
	let mut buf = vec![0_u8; 128];
	let mut none = [0_u8; HANDLE_SIZE - 1];
	assert!(matches!(PackWriter::open(PackVersion::V2, &mut buf, &mut none), Err(Status::NoTempSpace)));

	let mut scratch = [0_u8; HANDLE_SIZE];
	let mut writer = PackWriter::open(PackVersion::V2, &mut buf, &mut scratch).expect("root handle fits");
	assert!(matches!(writer.root().put_object(Some("o")), Err(Status::NoTempSpace)));
}

#[test]
fn dropped_sub_pack_is_finalized() {
	let bytes = write_pack(PackVersion::V2, |root| {
		let mut child = root.put_object(Some("child")).expect("object opens");
		child.put_i32(Some("x"), 5).expect("put succeeds");
	});

	let items = top_level(&bytes);
	assert_eq!(items.len(), 1);
	assert_eq!(items[0].0, ItemKind::Object);
	assert_eq!(items[0].2, [0x14, 2, b'x', 0, 5, 0, 0, 0]);
}

#[test]
fn size_and_close_check_state() {
	let mut buf = vec![0_u8; 64];
	let mut scratch = vec![0_u8; HANDLE_SIZE];
	let mut writer = PackWriter::open(PackVersion::V2, &mut buf, &mut scratch).expect("writer opens");
	assert_eq!(writer.size(), Err(Status::BadState));
	writer.close().expect("first close");
	assert_eq!(writer.close(), Err(Status::BadState));
	assert_eq!(writer.size(), Ok(10));
	assert_eq!(writer.root().put_null(Some("late")), Err(Status::BadState));
}

#[test]
fn reader_rejects_bad_leading_bytes_and_truncation() {
	let mut scratch = vec![0_u8; HANDLE_SIZE];
	assert!(matches!(PackReader::open(b"JUNKJUNK", &mut scratch), Err(Status::BadVersion)));
	assert!(matches!(PackReader::open(&[], &mut scratch), Err(Status::Truncated)));
	assert!(matches!(PackReader::open(&[0x10, 0, 9, 0, 0, 0, 0, 0, 0, 0], &mut scratch), Err(Status::Truncated)));

	let mut none = [0_u8; 0];
	let empty = [0x10, 0, 0, 0, 0, 0, 0, 0, 0, 0];
	assert!(matches!(PackReader::open(&empty, &mut none), Err(Status::NoTempSpace)));
}

#[test]
fn reader_rejects_bytes_after_root() {
	let mut scratch = vec![0_u8; HANDLE_SIZE];
	let padded = [0x10, 0, 0, 0, 0, 0, 0, 0, 0, 0, b'X'];
	assert!(matches!(PackReader::open(&padded, &mut scratch), Err(Status::BadData)));
	assert!(PackReader::open(&padded[..10], &mut scratch).is_ok());
}

#[test]
fn unknown_fixed_tags_parse_and_bad_nibbles_do_not() {
	let int8 = [0x10, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0x11, 0, 9];
	let items = top_level(&int8);
	assert_eq!(items, [(ItemKind::Unknown(0x11), None, vec![9])]);

	let mut scratch = vec![0_u8; HANDLE_SIZE];
	let bad = [0x10, 0, 3, 0, 0, 0, 1, 0, 0, 0, 0x13, 0, 9];
	let mut reader = PackReader::open(&bad, &mut scratch).expect("root header is valid");
	assert_eq!(reader.root().first_item().map(|item| item.kind), Err(Status::BadData));
}

#[test]
fn sub_pack_requires_container_and_scratch() {
	let bytes = write_pack(PackVersion::V2, |root| {
		root.put_i32(Some("n"), 1).expect("put succeeds");
		let child = root.put_array(Some("a")).expect("array opens");
		child.finish().expect("array finishes");
	});

	let mut scratch = vec![0_u8; HANDLE_SIZE];
	let mut reader = PackReader::open(&bytes, &mut scratch).expect("reader opens");
	let mut root = reader.root();
	let number = root.first_item().expect("number item");
	assert!(matches!(root.sub_pack(&number), Err(Status::BadType)));
	let array = root.next_item(&number).expect("array item");
	assert!(matches!(root.sub_pack(&array), Err(Status::NoTempSpace)));
}
