//! Host-side data an observer can ask for besides profile data.
//!
//! The host application implements [`SceneProvider`]; a transport layer
//! calls it and encodes the results. Nothing here is tied to a wire format
//! or builds the scene tree.

/// Coarse frame-rate numbers reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerfMetrics {
    /// Frames per second.
    pub fps: f32,
    /// Last frame time in milliseconds.
    pub frame_time_ms: f32,
    /// Live entities in the scene.
    pub entity_count: u32,
}

impl PerfMetrics {
    /// Derive metrics from a frame time.
    pub fn from_frame_time(frame_time_ms: f32, entity_count: u32) -> Self {
        let fps = if frame_time_ms > 0.0 {
            1000.0 / frame_time_ms
        } else {
            0.0
        };
        Self {
            fps,
            frame_time_ms,
            entity_count,
        }
    }
}

/// One node of the flat scene list. `parent_id == 0` marks a root.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SceneNode {
    /// Stable, non-zero node id.
    pub id: u64,
    /// Parent node id, 0 for roots.
    pub parent_id: u64,
    /// Type label, e.g. "Camera".
    pub type_name: String,
    /// Display name; `None` if unnamed.
    pub name: Option<String>,
}

impl SceneNode {
    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id == 0
    }
}

/// Value of an entity property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "value", rename_all = "lowercase"))]
pub enum PropertyValue {
    /// Floating-point scalar.
    Float(f32),
    /// Integer scalar.
    Int(i64),
    /// Free-form text.
    String(String),
    /// Hex color such as `#1a1a2e`.
    Color(String),
    /// Polyline or polygon in local coordinates.
    Points2D(Vec<(f32, f32)>),
}

impl PropertyValue {
    /// Short type label for observers.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Float(_) => "float",
            PropertyValue::Int(_) => "int",
            PropertyValue::String(_) => "string",
            PropertyValue::Color(_) => "color",
            PropertyValue::Points2D(_) => "points2d",
        }
    }
}

/// A named entity property.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Property {
    /// Property name as shown to observers.
    pub name: String,
    /// Typed value.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub value: PropertyValue,
}

impl Property {
    /// Build a float property.
    pub fn float(name: impl Into<String>, v: f32) -> Self {
        Self::new(name, PropertyValue::Float(v))
    }

    /// Build an integer property.
    pub fn int(name: impl Into<String>, v: i64) -> Self {
        Self::new(name, PropertyValue::Int(v))
    }

    /// Build a text property.
    pub fn string(name: impl Into<String>, v: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::String(v.into()))
    }

    /// Build a hex color property.
    pub fn color(name: impl Into<String>, hex: impl Into<String>) -> Self {
        Self::new(name, PropertyValue::Color(hex.into()))
    }

    /// Build a point-list property.
    pub fn points2d(name: impl Into<String>, points: Vec<(f32, f32)>) -> Self {
        Self::new(name, PropertyValue::Points2D(points))
    }

    fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Details for one entity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntityInfo {
    /// Host-assigned entity id.
    pub id: u64,
    /// Host type label, e.g. `"Camera"`.
    pub type_name: String,
    /// Display name, if the entity has one.
    pub name: Option<String>,
    /// Properties in the order the host reports them.
    pub properties: Vec<Property>,
}

/// What a host application exposes to an external observer.
///
/// Called from transport threads, so implementations must be `Send + Sync`
/// and should copy data out of the simulation rather than hold locks.
pub trait SceneProvider: Send + Sync {
    /// Current frame-rate numbers.
    fn perf(&self) -> PerfMetrics;

    /// Flat list of scene nodes with parent links.
    fn scene(&self) -> Vec<SceneNode>;

    /// Details for one entity, or `None` if it does not exist.
    fn entity(&self, id: u64) -> Option<EntityInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TinyScene;

    impl SceneProvider for TinyScene {
        fn perf(&self) -> PerfMetrics {
            PerfMetrics::from_frame_time(16.0, 2)
        }

        fn scene(&self) -> Vec<SceneNode> {
            vec![
                SceneNode {
                    id: 0xA000,
                    parent_id: 0,
                    type_name: "Transform".into(),
                    name: Some("Root".into()),
                },
                SceneNode {
                    id: 0xA200,
                    parent_id: 0xA000,
                    type_name: "Camera".into(),
                    name: None,
                },
            ]
        }

        fn entity(&self, id: u64) -> Option<EntityInfo> {
            (id == 0xA200).then(|| EntityInfo {
                id,
                type_name: "Camera".into(),
                name: None,
                properties: vec![
                    Property::float("fov", 75.0),
                    Property::color("clearColor", "#1a1a2e"),
                ],
            })
        }
    }

    #[test]
    fn test_provider_as_trait_object() {
        let provider: Box<dyn SceneProvider> = Box::new(TinyScene);
        assert_eq!(provider.perf().fps, 62.5);

        let roots: Vec<_> = provider.scene().into_iter().filter(SceneNode::is_root).collect();
        assert_eq!(roots.len(), 1);

        let camera = provider.entity(0xA200).unwrap();
        assert_eq!(camera.properties[1].value.type_name(), "color");
        assert!(provider.entity(1).is_none());
    }

    #[test]
    fn test_property_constructors() {
        let p = Property::points2d("path", vec![(0.0, 1.0), (2.0, 3.0)]);
        assert_eq!(p.name, "path");
        assert_eq!(p.value.type_name(), "points2d");
        assert_eq!(Property::int("n", 3).value, PropertyValue::Int(3));
        assert_eq!(
            Property::string("tag", "world").value,
            PropertyValue::String("world".into())
        );
    }

    #[test]
    fn test_zero_frame_time() {
        assert_eq!(PerfMetrics::from_frame_time(0.0, 0).fps, 0.0);
    }
}
