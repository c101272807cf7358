use crate::container::VertexGroup;

/// Active face of a combined mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombinedFace {
	/// Indices into [`CombinedMesh::vertices`].
	pub indices: [u32; 3],
	/// 1-based ordinal of the mesh entry the face came from.
	pub mesh: usize,
}

/// Every vertex group of a package merged into one indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedMesh {
	/// Raw vertex positions.
	pub vertices: Vec<[i16; 3]>,
	/// One texture coordinate per vertex.
	pub uvs: Vec<[i16; 2]>,
	/// Active faces only.
	pub faces: Vec<CombinedFace>,
}

impl CombinedMesh {
	/// Append `groups` of mesh entry `mesh`, rebasing face indices.
	pub fn extend_mesh<'a>(&mut self, mesh: usize, groups: impl IntoIterator<Item = &'a VertexGroup>) {
		for group in groups {
			let base = self.vertices.len() as u32;
			self.faces.extend(group.active_faces().map(|face| CombinedFace {
				indices: face.indices.map(|index| index + base),
				mesh,
			}));

			self.vertices.extend_from_slice(&group.vertices);
			self.uvs.extend(group.uvs.iter().copied().chain(std::iter::repeat([0, 0])).take(group.vertices.len()));
		}
	}

	/// Return whether there is nothing to draw.
	pub fn is_empty(&self) -> bool {
		self.vertices.is_empty() || self.faces.is_empty()
	}
}
