//! Tagged sub-block scanner for raw mesh geometry streams.
//!
//! A mesh region has no top-level framing. Geometry blocks are found by
//! looking for a 2-byte signature followed by a count byte and a type byte:
//!
//! | block      | channel A | channel B | type      | payload                          |
//! |------------|-----------|-----------|-----------|----------------------------------|
//! | vertex     | `EE 00`   | `1B 02`   | `69`      | count x `(x, y, z)` LE `i16`     |
//! | uv         | `C4 00`   | `F1 01`   | `65`/`66` | count x `(u, v)` LE `i16` (`65`) |
//! | face flags | `9A 00`   | `C7 01`   | `6A`      | 6 bytes, then 1 flag per 3 bytes |
//!
//! Each of the six rows is scanned independently over the whole region.

use crate::container::{Diagnostics, Warning};

/// Largest count byte accepted in a tag.
pub const MAX_BLOCK_COUNT: u8 = 0x2A;
/// Type byte of vertex blocks.
pub const VERTEX_TYPE: u8 = 0x69;
/// Uv block type whose pairs are decoded.
pub const UV_INLINE: u8 = 0x65;
/// Uv block type recorded without decoded pairs.
pub const UV_EMPTY: u8 = 0x66;
/// Type byte of face flag blocks.
pub const FACE_FLAG_TYPE: u8 = 0x6A;

const TAG_LEN: usize = 4;

/// One of the two parallel geometry channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Channel {
	/// Primary tag family.
	A,
	/// Secondary tag family.
	B,
}

impl Channel {
	/// Both channels in output order.
	pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

	/// Short label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::A => "A",
			Self::B => "B",
		}
	}
}

/// Geometry block family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
	/// Vertex positions.
	Vertex,
	/// Texture coordinates.
	Uv,
	/// Per-face enable flags.
	FaceFlags,
}

impl BlockKind {
	/// Short label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Vertex => "vertex",
			Self::Uv => "uv",
			Self::FaceFlags => "face flag",
		}
	}
}

/// One row of the tag table: how to find and slice one block family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRow {
	/// Channel the row belongs to.
	pub channel: Channel,
	/// Block family.
	pub kind: BlockKind,
	/// Leading signature bytes.
	pub signature: [u8; 2],
	/// Accepted type bytes following the count.
	pub type_bytes: &'static [u8],
	/// Bytes skipped between the tag and the first unit.
	pub skip: usize,
	/// Distance between consecutive units.
	pub stride: usize,
	/// Bytes read per unit.
	pub unit_len: usize,
}

impl TagRow {
	/// Table row for `kind` on `channel`.
	pub const fn of(channel: Channel, kind: BlockKind) -> Self {
		let signature = match (channel, kind) {
			(Channel::A, BlockKind::Vertex) => [0xEE, 0x00],
			(Channel::B, BlockKind::Vertex) => [0x1B, 0x02],
			(Channel::A, BlockKind::Uv) => [0xC4, 0x00],
			(Channel::B, BlockKind::Uv) => [0xF1, 0x01],
			(Channel::A, BlockKind::FaceFlags) => [0x9A, 0x00],
			(Channel::B, BlockKind::FaceFlags) => [0xC7, 0x01],
		};
		match kind {
			BlockKind::Vertex => Self {
				channel,
				kind,
				signature,
				type_bytes: &[VERTEX_TYPE],
				skip: 0,
				stride: 6,
				unit_len: 6,
			},
			BlockKind::Uv => Self {
				channel,
				kind,
				signature,
				type_bytes: &[UV_INLINE, UV_EMPTY],
				skip: 0,
				stride: 4,
				unit_len: 4,
			},
			BlockKind::FaceFlags => Self {
				channel,
				kind,
				signature,
				type_bytes: &[FACE_FLAG_TYPE],
				skip: 6,
				stride: 3,
				unit_len: 1,
			},
		}
	}

	/// Number of units a tag announces.
	pub fn requested_units(&self, count: u8, type_byte: u8) -> usize {
		match self.kind {
			BlockKind::Vertex => usize::from(count),
			BlockKind::Uv if type_byte == UV_INLINE => usize::from(count),
			BlockKind::Uv => 0,
			BlockKind::FaceFlags => usize::from(count.saturating_sub(2)),
		}
	}

	fn matches(&self, window: &[u8]) -> bool {
		window[..2] == self.signature && window[2] <= MAX_BLOCK_COUNT && self.type_bytes.contains(&window[3])
	}
}

/// Tag occurrence with its in-bounds payload units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
	/// Offset of the tag inside the region.
	pub offset: usize,
	/// Count byte.
	pub count: u8,
	/// Type byte.
	pub type_byte: u8,
	/// Payload units that fit inside the region, in order.
	pub units: Vec<&'a [u8]>,
}

/// Scan `region` left to right for every occurrence of `row`.
///
/// After a match the scan resumes behind the payload it consumed; otherwise
/// it advances one byte. Units never extend past the region end.
pub fn scan_row<'a>(region: &'a [u8], row: &TagRow) -> Vec<RawBlock<'a>> {
	let mut blocks = Vec::new();
	let mut pos = 0;

	while pos + TAG_LEN <= region.len() {
		let window = &region[pos..pos + TAG_LEN];
		if !row.matches(window) {
			pos += 1;
			continue;
		}

		let (count, type_byte) = (window[2], window[3]);
		let payload = pos + TAG_LEN;
		let mut units = Vec::new();
		for i in 0..row.requested_units(count, type_byte) {
			let start = payload + row.skip + i * row.stride;
			let Some(unit) = region.get(start..start + row.unit_len) else {
				break;
			};
			units.push(unit);
		}

		let span = if units.is_empty() {
			0
		} else {
			row.skip + units.len() * row.stride
		};
		blocks.push(RawBlock {
			offset: pos,
			count,
			type_byte,
			units,
		});
		pos = (payload + span).min(region.len());
	}

	blocks
}

fn le_i16(unit: &[u8], at: usize) -> i16 {
	i16::from_le_bytes([unit[at], unit[at + 1]])
}

/// Decoded vertex positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexBlock {
	/// Geometry channel.
	pub channel: Channel,
	/// Tag offset inside the mesh region.
	pub offset: usize,
	/// Announced vertex count.
	pub count: u8,
	/// Decoded `(x, y, z)` positions in raw integer units.
	pub vertices: Vec<[i16; 3]>,
}

/// Decoded texture coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UvBlock {
	/// Geometry channel.
	pub channel: Channel,
	/// Tag offset inside the mesh region.
	pub offset: usize,
	/// Announced pair count.
	pub count: u8,
	/// Type byte, [`UV_INLINE`] or [`UV_EMPTY`].
	pub kind: u8,
	/// Decoded `(u, v)` pairs; always empty for [`UV_EMPTY`].
	pub uvs: Vec<[i16; 2]>,
}

/// Decoded per-face enable flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceFlagBlock {
	/// Geometry channel.
	pub channel: Channel,
	/// Tag offset inside the mesh region.
	pub offset: usize,
	/// Raw count byte, including two header slots.
	pub raw_count: u8,
	/// `true` where the flag byte is even.
	pub flags: Vec<bool>,
}

/// All blocks of one channel, each list in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelGeometry {
	/// Channel these blocks belong to.
	pub channel: Channel,
	/// Vertex blocks.
	pub vertex_blocks: Vec<VertexBlock>,
	/// Uv blocks.
	pub uv_blocks: Vec<UvBlock>,
	/// Face flag blocks.
	pub flag_blocks: Vec<FaceFlagBlock>,
}

impl ChannelGeometry {
	/// Scan `region` for the three block families of `channel`.
	pub fn scan(region: &[u8], channel: Channel) -> Self {
		let vertex_blocks = scan_row(region, &TagRow::of(channel, BlockKind::Vertex))
			.into_iter()
			.map(|raw| VertexBlock {
				channel,
				offset: raw.offset,
				count: raw.count,
				vertices: raw.units.iter().map(|u| [le_i16(u, 0), le_i16(u, 2), le_i16(u, 4)]).collect(),
			})
			.collect();

		let uv_blocks = scan_row(region, &TagRow::of(channel, BlockKind::Uv))
			.into_iter()
			.map(|raw| UvBlock {
				channel,
				offset: raw.offset,
				count: raw.count,
				kind: raw.type_byte,
				uvs: raw.units.iter().map(|u| [le_i16(u, 0), le_i16(u, 2)]).collect(),
			})
			.collect();

		let flag_blocks = scan_row(region, &TagRow::of(channel, BlockKind::FaceFlags))
			.into_iter()
			.map(|raw| FaceFlagBlock {
				channel,
				offset: raw.offset,
				raw_count: raw.count,
				flags: raw.units.iter().map(|u| u[0] % 2 == 0).collect(),
			})
			.collect();

		Self {
			channel,
			vertex_blocks,
			uv_blocks,
			flag_blocks,
		}
	}

	/// Return whether no block of any family was found.
	pub fn is_empty(&self) -> bool {
		self.vertex_blocks.is_empty() && self.uv_blocks.is_empty() && self.flag_blocks.is_empty()
	}
}

/// Reference to one decoded block of any family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryBlock<'a> {
	/// Vertex block.
	Vertex(&'a VertexBlock),
	/// Uv block.
	Uv(&'a UvBlock),
	/// Face flag block.
	FaceFlags(&'a FaceFlagBlock),
}

impl GeometryBlock<'_> {
	/// Block family.
	pub fn kind(&self) -> BlockKind {
		match self {
			Self::Vertex(_) => BlockKind::Vertex,
			Self::Uv(_) => BlockKind::Uv,
			Self::FaceFlags(_) => BlockKind::FaceFlags,
		}
	}

	/// Geometry channel.
	pub fn channel(&self) -> Channel {
		match self {
			Self::Vertex(block) => block.channel,
			Self::Uv(block) => block.channel,
			Self::FaceFlags(block) => block.channel,
		}
	}

	/// Tag offset inside the mesh region.
	pub fn offset(&self) -> usize {
		match self {
			Self::Vertex(block) => block.offset,
			Self::Uv(block) => block.offset,
			Self::FaceFlags(block) => block.offset,
		}
	}

	/// Units the tag announced.
	pub fn requested(&self) -> usize {
		match self {
			Self::Vertex(block) => usize::from(block.count),
			Self::Uv(block) => TagRow::of(block.channel, BlockKind::Uv).requested_units(block.count, block.kind),
			Self::FaceFlags(block) => usize::from(block.raw_count.saturating_sub(2)),
		}
	}

	/// Units actually decoded.
	pub fn decoded(&self) -> usize {
		match self {
			Self::Vertex(block) => block.vertices.len(),
			Self::Uv(block) => block.uvs.len(),
			Self::FaceFlags(block) => block.flags.len(),
		}
	}

	/// Return whether the region ended before all announced units.
	pub fn is_truncated(&self) -> bool {
		self.decoded() < self.requested()
	}
}

/// Decoded geometry of one mesh entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshGeometry {
	/// Channel A blocks.
	pub a: ChannelGeometry,
	/// Channel B blocks.
	pub b: ChannelGeometry,
}

impl MeshGeometry {
	/// Borrow the blocks of `channel`.
	pub fn channel(&self, channel: Channel) -> &ChannelGeometry {
		match channel {
			Channel::A => &self.a,
			Channel::B => &self.b,
		}
	}

	/// Return whether neither channel holds any block.
	pub fn is_empty(&self) -> bool {
		self.a.is_empty() && self.b.is_empty()
	}

	/// All blocks ordered by region offset.
	pub fn blocks(&self) -> Vec<GeometryBlock<'_>> {
		let mut blocks = Vec::new();
		for channel in [&self.a, &self.b] {
			blocks.extend(channel.vertex_blocks.iter().map(GeometryBlock::Vertex));
			blocks.extend(channel.uv_blocks.iter().map(GeometryBlock::Uv));
			blocks.extend(channel.flag_blocks.iter().map(GeometryBlock::FaceFlags));
		}
		blocks.sort_by_key(|block| block.offset());
		blocks
	}

	/// Report every truncated block of mesh `mesh` to `diag`.
	pub fn report_truncation(&self, mesh: usize, diag: &mut Diagnostics) {
		for block in self.blocks().into_iter().filter(|block| block.is_truncated()) {
			diag.push(Warning::BlockTruncated {
				mesh,
				channel: block.channel(),
				kind: block.kind(),
				offset: block.offset(),
				declared: block.requested(),
				decoded: block.decoded(),
			});
		}
	}
}

/// Scan one mesh region for both geometry channels.
pub fn scan_geometry(region: &[u8]) -> MeshGeometry {
	MeshGeometry {
		a: ChannelGeometry::scan(region, Channel::A),
		b: ChannelGeometry::scan(region, Channel::B),
	}
}
