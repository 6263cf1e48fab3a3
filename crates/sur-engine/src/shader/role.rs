use std::fmt;

use crate::gl;

/// Pipeline stage a shader source belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum ShaderRole {
    Vertex,
    Fragment,
}

impl ShaderRole {
    /// Both roles in compile order.
    pub const ALL: [ShaderRole; 2] = [ShaderRole::Vertex, ShaderRole::Fragment];

    /// The markup `type` tag naming this role.
    pub const fn tag(self) -> &'static str {
        match self {
            ShaderRole::Vertex => "vertex-shader",
            ShaderRole::Fragment => "fragment-shader",
        }
    }

    /// Parses a markup `type` tag. Anything but the two exact tags is `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        ShaderRole::ALL.into_iter().find(|r| r.tag() == tag)
    }

    /// GL shader-type enum passed to `create_shader`.
    pub const fn gl_stage(self) -> u32 {
        match self {
            ShaderRole::Vertex => gl::VERTEX_SHADER,
            ShaderRole::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ShaderRole::Vertex => "vertex",
            ShaderRole::Fragment => "fragment",
        })
    }
}

/// A value per shader role; the shape of `sources` and `compiled` on a set.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleMap<T> {
    vertex: Option<T>,
    fragment: Option<T>,
}

impl<T> Default for RoleMap<T> {
    fn default() -> Self {
        Self { vertex: None, fragment: None }
    }
}

impl<T> RoleMap<T> {
    pub fn get(&self, role: ShaderRole) -> Option<&T> {
        match role {
            ShaderRole::Vertex => self.vertex.as_ref(),
            ShaderRole::Fragment => self.fragment.as_ref(),
        }
    }

    /// Stores `value` under `role`, returning the previous value.
    pub fn insert(&mut self, role: ShaderRole, value: T) -> Option<T> {
        let slot = match role {
            ShaderRole::Vertex => &mut self.vertex,
            ShaderRole::Fragment => &mut self.fragment,
        };
        slot.replace(value)
    }

    pub fn contains(&self, role: ShaderRole) -> bool {
        self.get(role).is_some()
    }

    /// First role (in compile order) with no value.
    pub fn missing(&self) -> Option<ShaderRole> {
        ShaderRole::ALL.into_iter().find(|r| !self.contains(*r))
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShaderRole, &T)> {
        ShaderRole::ALL
            .into_iter()
            .filter_map(move |r| self.get(r).map(|v| (r, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_exactly() {
        assert_eq!(ShaderRole::from_tag("vertex-shader"), Some(ShaderRole::Vertex));
        assert_eq!(ShaderRole::from_tag("fragment-shader"), Some(ShaderRole::Fragment));
        assert_eq!(ShaderRole::from_tag("Vertex-Shader"), None);
        assert_eq!(ShaderRole::from_tag("x-shader/x-vertex"), None);
        assert_eq!(ShaderRole::from_tag(""), None);
    }

    #[test]
    fn gl_stage_values() {
        assert_eq!(ShaderRole::Vertex.gl_stage(), 0x8B31);
        assert_eq!(ShaderRole::Fragment.gl_stage(), 0x8B30);
    }

    #[test]
    fn role_map_reports_first_missing_role() {
        let mut m = RoleMap::default();
        assert_eq!(m.missing(), Some(ShaderRole::Vertex));
        m.insert(ShaderRole::Fragment, 1);
        assert_eq!(m.missing(), Some(ShaderRole::Vertex));
        m.insert(ShaderRole::Vertex, 2);
        assert!(m.is_complete());
        assert_eq!(m.insert(ShaderRole::Vertex, 3), Some(2));
        let roles: Vec<_> = m.iter().map(|(r, v)| (r, *v)).collect();
        assert_eq!(roles, [(ShaderRole::Vertex, 3), (ShaderRole::Fragment, 1)]);
    }
}
