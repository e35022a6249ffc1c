//! Scene model - walls, objects and labels the input layer edits.
//!
//! Walls keep their rendered `d` attribute next to the logical record. The
//! path text is parsed on demand so a malformed path only blocks edits to
//! that one wall. Objects and labels are indexed in R-trees for hit testing.

use crate::constants::MIN_WALL_HIT_AREA;
use crate::path::{wall_outline, Path, PathResult};
use crate::spatial_index::SpatialIndex;
use crate::types::{segment_distance, LabelId, ObjectId, PlanObject, SceneElement, TextLabel, WallId, WallKind, WallRecord};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A wall: logical record plus rendered path data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub record: WallRecord,
    pub d: String,
}

impl Wall {
    pub fn id(&self) -> WallId {
        self.record.id
    }

    pub fn path(&self) -> PathResult<Path> {
        Path::parse(&self.d)
    }

    /// Whether `point` hits the wall. Closed outlines are tested as polygons;
    /// open paths by distance to their stroke.
    pub fn contains(&self, point: Point) -> bool {
        let (closed, vertices) = match self.path() {
            Ok(path) => (path.is_closed(), path.vertices()),
            Err(_) => (false, Vec::new()),
        };
        if closed && vertices.len() >= 3 {
            return ray_casting(point, &vertices);
        }
        let reach = (self.record.thickness / 2.0).max(MIN_WALL_HIT_AREA);
        let distance = if vertices.len() >= 2 {
            vertices
                .windows(2)
                .map(|pair| segment_distance(point, pair[0], pair[1]))
                .fold(f64::INFINITY, f64::min)
        } else {
            self.record.distance_to(point)
        };
        distance <= reach
    }
}

/// Even-odd point-in-polygon test.
pub fn ray_casting(point: Point, polygon: &[Point]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[derive(Default)]
pub struct Scene {
    walls: Vec<Wall>,
    objects: Vec<PlanObject>,
    labels: Vec<TextLabel>,
    object_index: SpatialIndex<ObjectId>,
    label_index: SpatialIndex<LabelId>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id, unique across walls, objects and labels.
    pub fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn reserve_id(&mut self, id: u64) {
        self.next_id = self.next_id.max(id);
    }

    // ------------------------------------------------------------------------
    // Insertion & lookup
    // ------------------------------------------------------------------------

    pub fn insert_wall(&mut self, record: WallRecord, d: impl Into<String>) -> WallId {
        let id = record.id;
        self.reserve_id(id.0);
        self.walls.push(Wall { record, d: d.into() });
        id
    }

    /// Create a straight wall with a rectangular outline.
    pub fn add_wall(&mut self, start: Point, end: Point, thickness: f64) -> WallId {
        let id = WallId(self.allocate_id());
        let d = wall_outline(start, end, thickness).to_string();
        self.insert_wall(WallRecord::new(id, start, end, thickness), d)
    }

    pub fn insert_object(&mut self, object: PlanObject) -> ObjectId {
        let id = object.id;
        self.reserve_id(id.0);
        self.object_index.insert(id, object.bounding_box());
        self.objects.push(object);
        id
    }

    pub fn insert_label(&mut self, label: TextLabel) -> LabelId {
        let id = label.id;
        self.reserve_id(id.0);
        self.label_index.insert(id, label.bounds());
        self.labels.push(label);
        id
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn objects(&self) -> &[PlanObject] {
        &self.objects
    }

    pub fn labels(&self) -> &[TextLabel] {
        &self.labels
    }

    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id() == id)
    }

    pub fn wall_mut(&mut self, id: WallId) -> Option<&mut Wall> {
        self.walls.iter_mut().find(|w| w.id() == id)
    }

    pub fn object(&self, id: ObjectId) -> Option<&PlanObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn label(&self, id: LabelId) -> Option<&TextLabel> {
        self.labels.iter().find(|l| l.id == id)
    }

    // ------------------------------------------------------------------------
    // Hit testing
    // ------------------------------------------------------------------------

    /// First wall in drawing order under `point`.
    pub fn wall_at(&self, point: Point) -> Option<WallId> {
        self.walls.iter().find(|w| w.contains(point)).map(Wall::id)
    }

    /// Topmost object under `point`.
    pub fn object_at(&self, point: Point) -> Option<ObjectId> {
        let candidates = self.object_index.query_point(point);
        self.objects
            .iter()
            .rev()
            .filter(|o| candidates.contains(&o.id))
            .find(|o| o.contains(point))
            .map(|o| o.id)
    }

    /// Topmost label under `point`.
    pub fn label_at(&self, point: Point) -> Option<LabelId> {
        let candidates = self.label_index.query_point(point);
        self.labels
            .iter()
            .rev()
            .find(|l| candidates.contains(&l.id))
            .map(|l| l.id)
    }

    /// Label, then object, then wall.
    pub fn element_at(&self, point: Point) -> Option<SceneElement> {
        self.label_at(point)
            .map(SceneElement::Label)
            .or_else(|| self.object_at(point).map(SceneElement::Object))
            .or_else(|| self.wall_at(point).map(SceneElement::Wall))
    }

    /// Closest wall endpoint within `radius`.
    pub fn nearest_wall_node(&self, point: Point, radius: f64) -> Option<Point> {
        self.walls
            .iter()
            .flat_map(|w| [w.record.start, w.record.end])
            .map(|node| (node, node.distance(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(node, _)| node)
    }

    /// Path vertices of every wall except `except`, tagged with their wall.
    /// Walls whose path cannot be read are skipped.
    pub fn other_wall_vertices(&self, except: WallId) -> Vec<(WallId, Point)> {
        self.walls
            .iter()
            .filter(|w| w.id() != except)
            .filter_map(|w| w.path().ok().map(|p| (w.id(), p.vertices())))
            .flat_map(|(id, vertices)| vertices.into_iter().map(move |v| (id, v)))
            .collect()
    }

    pub fn objects_on_wall(&self, wall: WallId) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| o.wall == Some(wall))
            .map(|o| o.id)
            .collect()
    }

    // ------------------------------------------------------------------------
    // Wall mutations
    // ------------------------------------------------------------------------

    /// Remove a wall and clear every parent/child link pointing at it.
    /// Anchored objects are left for the caller.
    pub fn remove_wall(&mut self, id: WallId) -> Option<Wall> {
        let index = self.walls.iter().position(|w| w.id() == id)?;
        let removed = self.walls.remove(index);

        for wall in &mut self.walls {
            if wall.record.parent == Some(id) {
                wall.record.parent = None;
            }
            if wall.record.child == Some(id) {
                wall.record.child = None;
            }
        }

        debug!(wall = %id, "Wall removed");
        Some(removed)
    }

    /// Split a wall at its midpoint. The new second half follows the
    /// original in drawing order and inherits its child link.
    pub fn split_wall(&mut self, id: WallId) -> Option<WallId> {
        let original = self.wall(id)?.record.clone();
        let new_id = WallId(self.allocate_id());
        let mid = original.midpoint();

        let mut second = WallRecord::new(new_id, mid, original.end, original.thickness);
        second.kind = original.kind;
        second.parent = Some(id);
        second.child = original.child;

        if let Some(next) = original.child.and_then(|child| self.wall_mut(child)) {
            if next.record.parent == Some(id) {
                next.record.parent = Some(new_id);
            }
        }

        let index = self.walls.iter().position(|w| w.id() == id)?;
        {
            let first = &mut self.walls[index];
            first.record.end = mid;
            first.record.child = Some(new_id);
            first.d = wall_outline(first.record.start, mid, first.record.thickness).to_string();
        }
        let second_d = wall_outline(mid, original.end, original.thickness).to_string();
        self.walls.insert(index + 1, Wall { record: second.clone(), d: second_d });

        // Anchored objects move to whichever half they sit on
        let first = self.walls[index].record.clone();
        for object in &mut self.objects {
            if object.wall == Some(id) && second.distance_to(object.position) < first.distance_to(object.position) {
                object.wall = Some(new_id);
            }
        }

        debug!(wall = %id, new_wall = %new_id, "Wall split");
        Some(new_id)
    }

    pub fn set_wall_kind(&mut self, id: WallId, kind: WallKind) -> bool {
        match self.wall_mut(id) {
            Some(wall) => {
                wall.record.kind = kind;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------------
    // Object & label mutations
    // ------------------------------------------------------------------------

    pub fn remove_object(&mut self, id: ObjectId) -> Option<PlanObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        self.object_index.remove(id);
        Some(self.objects.remove(index))
    }

    pub fn move_object(&mut self, id: ObjectId, position: Point) -> bool {
        self.update_object(id, |object| object.position = position)
    }

    /// Rotate by `step` degrees, wrapping into [0, 360). Returns the new angle.
    pub fn rotate_object(&mut self, id: ObjectId, step: f64) -> Option<f64> {
        let mut angle = None;
        self.update_object(id, |object| {
            object.angle = (object.angle + step).rem_euclid(360.0);
            angle = Some(object.angle);
        });
        angle
    }

    /// Copy an object, shifted by `offset`, under a fresh id.
    pub fn duplicate_object(&mut self, id: ObjectId, offset: Vec2) -> Option<ObjectId> {
        let mut copy = self.object(id)?.clone();
        copy.id = ObjectId(self.allocate_id());
        copy.position += offset;
        Some(self.insert_object(copy))
    }

    pub fn translate_label(&mut self, id: LabelId, delta: Vec2) -> bool {
        let Some(label) = self.labels.iter_mut().find(|l| l.id == id) else {
            return false;
        };
        label.position += delta;
        let bounds = label.bounds();
        self.label_index.insert(id, bounds);
        true
    }

    fn update_object(&mut self, id: ObjectId, f: impl FnOnce(&mut PlanObject)) -> bool {
        let Some(object) = self.objects.iter_mut().find(|o| o.id == id) else {
            return false;
        };
        f(object);
        let bounds = object.bounding_box();
        self.object_index.insert(id, bounds);
        true
    }
}
