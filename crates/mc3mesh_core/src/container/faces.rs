use crate::container::{Channel, ChannelGeometry, MeshGeometry};

/// Triangle over three consecutive vertices of one vertex group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
	/// Vertex indices into the owning group.
	pub indices: [u32; 3],
	/// Whether the face should be rendered.
	pub active: bool,
}

/// Enumerate the `(i, i + 1, i + 2)` triangles of `vertex_count` vertices.
///
/// Face `i` takes `flags[i]` as its active state, or `true` past the end of `flags`.
pub fn synthesize_faces(vertex_count: usize, flags: &[bool]) -> Vec<Face> {
	(0..vertex_count.saturating_sub(2))
		.map(|i| {
			let base = i as u32;
			Face {
				indices: [base, base + 1, base + 2],
				active: flags.get(i).copied().unwrap_or(true),
			}
		})
		.collect()
}

/// Vertex block paired with its uv and flag blocks, ready for consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexGroup {
	/// Geometry channel.
	pub channel: Channel,
	/// 1-based position among the channel's vertex blocks.
	pub ordinal: usize,
	/// Raw vertex positions.
	pub vertices: Vec<[i16; 3]>,
	/// Texture coordinates, padded with `(0, 0)` up to the vertex count.
	///
	/// Longer lists are kept as decoded.
	pub uvs: Vec<[i16; 2]>,
	/// Synthesized faces.
	pub faces: Vec<Face>,
}

impl VertexGroup {
	/// Iterate faces whose flag is enabled.
	pub fn active_faces(&self) -> impl Iterator<Item = &Face> {
		self.faces.iter().filter(|face| face.active)
	}
}

/// Pair each vertex block of `channel` with the uv and flag blocks at the same position.
pub fn assemble_channel(channel: &ChannelGeometry) -> Vec<VertexGroup> {
	channel
		.vertex_blocks
		.iter()
		.enumerate()
		.map(|(i, block)| {
			let mut uvs = channel.uv_blocks.get(i).map(|uv| uv.uvs.clone()).unwrap_or_default();
			if uvs.len() < block.vertices.len() {
				uvs.resize(block.vertices.len(), [0, 0]);
			}
			let flags = channel.flag_blocks.get(i).map(|item| item.flags.as_slice()).unwrap_or(&[]);

			VertexGroup {
				channel: channel.channel,
				ordinal: i + 1,
				vertices: block.vertices.clone(),
				uvs,
				faces: synthesize_faces(block.vertices.len(), flags),
			}
		})
		.collect()
}

/// Assemble channel A groups followed by channel B groups.
pub fn assemble_groups(geometry: &MeshGeometry) -> Vec<VertexGroup> {
	let mut groups = assemble_channel(&geometry.a);
	groups.extend(assemble_channel(&geometry.b));
	groups
}

#[cfg(test)]
mod tests {
	use mc3mesh_testkit::{FLAG_TAG_A, FLAG_TAG_B, UV_TAG_A, UV_TAG_B, VERTEX_TAG_A, VERTEX_TAG_B, empty_uv_block, flag_block, uv_block, vertex_block};

	use crate::container::{Channel, scan_geometry};

	use super::{Face, assemble_groups, synthesize_faces};

	#[test]
	fn five_vertices_without_flags_give_three_active_faces() {
		let faces = synthesize_faces(5, &[]);
		assert_eq!(
			faces,
			vec![
				Face {
					indices: [0, 1, 2],
					active: true,
				},
				Face {
					indices: [1, 2, 3],
					active: true,
				},
				Face {
					indices: [2, 3, 4],
					active: true,
				},
			]
		);
	}

	#[test]
	fn fewer_than_three_vertices_give_no_faces() {
		assert!(synthesize_faces(0, &[]).is_empty());
		assert!(synthesize_faces(2, &[false]).is_empty());
	}

	#[test]
	fn flags_apply_by_position_and_default_to_active() {
		let faces = synthesize_faces(6, &[false, true]);
		let active: Vec<_> = faces.iter().map(|face| face.active).collect();
		assert_eq!(active, vec![false, true, true, true]);

		let extra = synthesize_faces(3, &[false, false, false]);
		assert_eq!(extra.len(), 1);
		assert!(!extra[0].active);
	}

	#[test]
	fn groups_pair_blocks_by_ordinal() {
		let mut region = vertex_block(VERTEX_TAG_A, &[[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0]]);
		region.extend(uv_block(UV_TAG_A, &[[3, 3]]));
		region.extend(flag_block(FLAG_TAG_A, &[0x01]));
		region.extend(vertex_block(VERTEX_TAG_A, &[[5, 5, 5], [6, 5, 5], [5, 6, 5]]));
		region.extend(vertex_block(VERTEX_TAG_B, &[[9, 9, 9], [8, 9, 9], [9, 8, 9]]));
		region.extend(empty_uv_block(UV_TAG_B, 3));
		region.extend(uv_block(UV_TAG_B, &[[1, 1], [2, 2], [3, 3], [4, 4]]));
		region.extend(flag_block(FLAG_TAG_B, &[0x00]));

		let groups = assemble_groups(&scan_geometry(&region));
		assert_eq!(groups.len(), 3);

		let first = &groups[0];
		assert_eq!((first.channel, first.ordinal), (Channel::A, 1));
		assert_eq!(first.uvs, vec![[3, 3], [0, 0], [0, 0], [0, 0]]);
		assert_eq!(first.faces.iter().map(|face| face.active).collect::<Vec<_>>(), vec![false, true]);
		assert_eq!(first.active_faces().count(), 1);

		let second = &groups[1];
		assert_eq!((second.channel, second.ordinal), (Channel::A, 2));
		assert_eq!(second.uvs, vec![[0, 0]; 3]);
		assert!(second.faces[0].active);

		let third = &groups[2];
		assert_eq!((third.channel, third.ordinal), (Channel::B, 1));
		assert_eq!(third.uvs, vec![[0, 0]; 3]);
		assert!(third.faces[0].active);
	}

	#[test]
	fn longer_uv_lists_are_not_truncated() {
		let mut region = vertex_block(VERTEX_TAG_A, &[[0, 0, 0], [1, 0, 0], [0, 1, 0]]);
		region.extend(uv_block(UV_TAG_A, &[[1, 1], [2, 2], [3, 3], [4, 4]]));

		let groups = assemble_groups(&scan_geometry(&region));
		assert_eq!(groups[0].uvs.len(), 4);
		assert_eq!(groups[0].vertices.len(), 3);
	}
}
