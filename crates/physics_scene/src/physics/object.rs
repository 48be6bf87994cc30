//! Object factory: a render mesh paired with a registered rigid body
//!
//! # Synchronization contract
//!
//! At creation the mesh transform and the body pose are identical. After
//! that, nothing here keeps them in sync: the owner's simulation loop must
//! copy the body pose into the mesh once per step, typically by calling
//! [`PhysicsObject::sync_mesh`] after [`SimulationWorld::step`].

use rapier3d::dynamics::{RigidBodyBuilder, RigidBodyHandle};
use rapier3d::geometry::{ColliderBuilder, ColliderHandle};

use super::{PhysicsError, ShapeConfiguration, ShapeKind, SimulationWorld};
use crate::core::ObjectConfig;
use crate::foundation::math::{is_finite_vec3, Isometry, Vec3};
use crate::render::{Color, Material, MeshInstance};

/// A mesh and the rigid body that drives it
#[derive(Debug, Clone)]
pub struct PhysicsObject {
    /// Visual half; its transform is refreshed by [`PhysicsObject::sync_mesh`]
    pub mesh: MeshInstance,
    body: RigidBodyHandle,
    collider: ColliderHandle,
    shape: ShapeConfiguration,
    mass: f32,
    local_inertia: Vec3,
}

impl PhysicsObject {
    /// Handle of the rigid body inside its world
    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    /// Handle of the attached collider inside its world
    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    /// Shape shared by mesh and collider
    pub fn shape(&self) -> &ShapeConfiguration {
        &self.shape
    }

    /// Requested mass
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Principal local inertia computed at creation
    pub fn local_inertia(&self) -> Vec3 {
        self.local_inertia
    }

    /// Whether the body is static (zero mass)
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Current pose of the rigid body in `world`
    pub fn body_pose<'w>(&self, world: &'w SimulationWorld) -> Result<&'w Isometry, PhysicsError> {
        world.body_pose(self.body).ok_or(PhysicsError::UnknownBody)
    }

    /// Copy the rigid body pose into the mesh transform
    pub fn sync_mesh(&mut self, world: &SimulationWorld) -> Result<(), PhysicsError> {
        let pose = world.body_pose(self.body).ok_or(PhysicsError::UnknownBody)?;
        self.mesh.transform.set_pose(pose);
        Ok(())
    }
}

impl SimulationWorld {
    /// Deregister an object's body and collider, returning the mesh
    pub fn remove_object(&mut self, object: PhysicsObject) -> Result<MeshInstance, PhysicsError> {
        self.remove(object.body)?;
        log::debug!("Removed {} body, {} bodies remain", object.shape.kind(), self.body_count());
        Ok(object.mesh)
    }

    /// Copy every body pose into its mesh; the per-step half of the contract
    pub fn sync_meshes<'a>(
        &self,
        objects: impl IntoIterator<Item = &'a mut PhysicsObject>,
    ) -> Result<(), PhysicsError> {
        objects.into_iter().try_for_each(|object| object.sync_mesh(self))
    }
}

/// Build a physics object and register its rigid body into `world`
///
/// A zero `mass` makes the body static with zero local inertia. Inputs are
/// validated before anything is inserted, so on error the world is
/// unchanged.
pub fn create_object(
    shape: ShapeConfiguration,
    mass: f32,
    position: Vec3,
    color: Color,
    world: &mut SimulationWorld,
) -> Result<PhysicsObject, PhysicsError> {
    if !mass.is_finite() || mass < 0.0 {
        log::warn!("Rejected {} with mass {}", shape.kind(), mass);
        return Err(PhysicsError::InvalidMass(mass));
    }
    if !is_finite_vec3(&position) {
        log::warn!("Rejected {} at non-finite position", shape.kind());
        return Err(PhysicsError::InvalidPosition([position.x, position.y, position.z]));
    }
    shape.validate()?;

    let mass_properties = shape.mass_properties(mass);
    let local_inertia = mass_properties.principal_inertia();

    let body_builder = if mass > 0.0 {
        RigidBodyBuilder::dynamic()
    } else {
        RigidBodyBuilder::fixed()
    };
    let body = body_builder.translation(position).build();
    let collider = ColliderBuilder::new(shape.collision_shape())
        .mass_properties(mass_properties)
        .build();

    let (body_handle, collider_handle) = world.insert(body, collider);

    let material = Material::from_color(color).with_name(shape.kind().as_str());
    let mesh = MeshInstance::new(shape.build_mesh(), material, position);

    log::debug!(
        "Created {} object: mass {}, position [{}, {}, {}], {} bodies in world",
        shape.kind(),
        mass,
        position.x,
        position.y,
        position.z,
        world.body_count()
    );

    Ok(PhysicsObject {
        mesh,
        body: body_handle,
        collider: collider_handle,
        shape,
        mass,
        local_inertia,
    })
}

/// Build a physics object from a shape kind name and a loose configuration
///
/// Unknown kinds fail with [`PhysicsError::UnsupportedShapeKind`] before the
/// world is touched.
pub fn create_object_from_config(
    kind: &str,
    config: &ObjectConfig,
    world: &mut SimulationWorld,
) -> Result<PhysicsObject, PhysicsError> {
    let kind: ShapeKind = kind.parse().map_err(|e| {
        log::warn!("{}", e);
        e
    })?;
    let shape = ShapeConfiguration::from_size(kind, config.size);
    create_object(shape, config.mass, config.position_vector(), config.material_color(), world)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::create_world;
    use crate::foundation::math::Transform;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn all_shapes() -> [ShapeConfiguration; 3] {
        [
            ShapeConfiguration::cuboid(Vec3::new(0.5, 0.25, 1.0)),
            ShapeConfiguration::sphere(0.5),
            ShapeConfiguration::cylinder(0.5, 0.3),
        ]
    }

    #[test]
    fn test_mesh_and_body_start_identical() {
        let mut world = create_world().unwrap();
        let positions = [
            Vec3::zeros(),
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(-250.5, 0.125, 1e4),
        ];

        for shape in all_shapes() {
            for position in positions {
                let object = create_object(shape, 1.0, position, Color::default(), &mut world).unwrap();
                let pose = object.body_pose(&world).unwrap();

                assert_eq!(object.mesh.transform, Transform::from_isometry(pose));
                assert_eq!(object.mesh.transform.position, position);
                assert_eq!(pose.translation.vector, position);
            }
        }
    }

    #[test]
    fn test_collider_matches_mesh_dimensions() {
        let mut world = create_world().unwrap();
        for shape in all_shapes() {
            let object = create_object(shape, 2.0, Vec3::zeros(), Color::default(), &mut world).unwrap();
            let collider = world.collider(object.collider_handle()).unwrap();
            let bounds = object.mesh.mesh.bounds_half_extents();

            match shape {
                ShapeConfiguration::Box { half_extents } => {
                    let cuboid = collider.shape().as_cuboid().unwrap();
                    assert_relative_eq!(cuboid.half_extents, half_extents, epsilon = EPSILON);
                    assert_relative_eq!(bounds, half_extents, epsilon = EPSILON);
                }
                ShapeConfiguration::Sphere { radius } => {
                    let ball = collider.shape().as_ball().unwrap();
                    assert_relative_eq!(ball.radius, radius, epsilon = EPSILON);
                    assert_relative_eq!(bounds.y, radius, epsilon = EPSILON);
                }
                ShapeConfiguration::Cylinder { half_height, radius } => {
                    let cylinder = collider.shape().as_cylinder().unwrap();
                    assert_relative_eq!(cylinder.half_height, half_height, epsilon = EPSILON);
                    assert_relative_eq!(cylinder.radius, radius, epsilon = EPSILON);
                    assert_relative_eq!(bounds.y, half_height, epsilon = EPSILON);
                    assert_relative_eq!(bounds.x, radius, epsilon = EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_zero_mass_is_static_with_zero_inertia() {
        let mut world = create_world().unwrap();
        let object = create_object(
            ShapeConfiguration::cuboid(Vec3::new(1.0, 1.0, 1.0)),
            0.0,
            Vec3::new(0.0, 5.0, 0.0),
            Color::default(),
            &mut world,
        )
        .unwrap();

        assert!(object.is_static());
        assert_eq!(object.local_inertia(), Vec3::zeros());
        assert!(world.body(object.body_handle()).unwrap().is_fixed());

        world.step_n(30);
        let pose = object.body_pose(&world).unwrap();
        assert_eq!(pose.translation.vector, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_unit_box_inertia() {
        let mut world = create_world().unwrap();
        let mass = 3.0;
        let object = create_object(
            ShapeConfiguration::cuboid(Vec3::new(1.0, 1.0, 1.0)),
            mass,
            Vec3::zeros(),
            Color::default(),
            &mut world,
        )
        .unwrap();

        let expected = mass / 12.0 * (2.0_f32.powi(2) + 2.0_f32.powi(2));
        assert_relative_eq!(
            object.local_inertia(),
            Vec3::new(expected, expected, expected),
            epsilon = 1e-4
        );
        world.step();
        let body = world.body(object.body_handle()).unwrap();
        assert!(body.is_dynamic());
        assert_relative_eq!(body.mass(), mass, epsilon = 1e-4);
    }

    #[test]
    fn test_n_objects_registered() {
        let mut world = create_world().unwrap();
        let kinds = ["sphere", "box", "cylinder", "box", "sphere"];

        for (i, kind) in kinds.iter().enumerate() {
            let config = ObjectConfig::default().with_position([i as f32 * 2.0, 1.0, 0.0]);
            create_object_from_config(kind, &config, &mut world).unwrap();
        }

        assert_eq!(world.body_count(), kinds.len());
        assert_eq!(world.collider_count(), kinds.len());
    }

    #[test]
    fn test_body_count_ignores_insertion_order() {
        let entries = [
            ("box", 0.0, [0.0, -0.5, 0.0]),
            ("sphere", 2.0, [1.0, 3.0, 0.0]),
            ("cylinder", 0.0, [-2.0, 0.0, 1.0]),
            ("box", 0.5, [0.0, 6.0, 0.0]),
            ("sphere", 1.0, [3.0, 1.0, -1.0]),
        ];
        let orders: [[usize; 5]; 3] = [[0, 1, 2, 3, 4], [4, 3, 2, 1, 0], [1, 3, 0, 4, 2]];

        for order in orders {
            let mut world = create_world().unwrap();
            for &index in &order {
                let (kind, mass, position) = entries[index];
                let config = ObjectConfig::default().with_mass(mass).with_position(position);
                create_object_from_config(kind, &config, &mut world).unwrap();
            }
            assert_eq!(world.body_count(), entries.len());
            assert_eq!(world.collider_count(), entries.len());
        }
    }

    #[test]
    fn test_extreme_mass_body_stays_dynamic_with_inertia() {
        let mut world = create_world().unwrap();
        let h = 0.01;
        let mass = 1e37;
        let object = create_object(
            ShapeConfiguration::cuboid(Vec3::new(h, h, h)),
            mass,
            Vec3::zeros(),
            Color::default(),
            &mut world,
        )
        .unwrap();

        let expected = mass / 3.0 * (2.0 * h * h);
        assert_relative_eq!(
            object.local_inertia(),
            Vec3::new(expected, expected, expected),
            max_relative = 1e-3
        );
        assert!(world.body(object.body_handle()).unwrap().is_dynamic());
    }

    #[test]
    fn test_unsupported_kind_has_no_side_effects() {
        let mut world = create_world().unwrap();
        create_object_from_config("box", &ObjectConfig::default(), &mut world).unwrap();

        let result = create_object_from_config("capsule", &ObjectConfig::default(), &mut world);

        assert_eq!(result.unwrap_err(), PhysicsError::UnsupportedShapeKind("capsule".to_string()));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);
    }

    #[test]
    fn test_invalid_inputs_have_no_side_effects() {
        let mut world = create_world().unwrap();
        let shape = ShapeConfiguration::sphere(1.0);

        for mass in [-1.0, f32::NAN, f32::INFINITY] {
            let result = create_object(shape, mass, Vec3::zeros(), Color::default(), &mut world);
            assert!(matches!(result, Err(PhysicsError::InvalidMass(_))));
        }

        let result = create_object(
            shape,
            1.0,
            Vec3::new(0.0, f32::NAN, 0.0),
            Color::default(),
            &mut world,
        );
        assert!(matches!(result, Err(PhysicsError::InvalidPosition(_))));

        let result = create_object(
            ShapeConfiguration::sphere(0.0),
            1.0,
            Vec3::zeros(),
            Color::default(),
            &mut world,
        );
        assert!(matches!(result, Err(PhysicsError::InvalidShapeDimensions { .. })));

        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_color_only_affects_material() {
        let mut world = create_world().unwrap();
        let shape = ShapeConfiguration::sphere(1.0);
        let red = create_object(shape, 1.0, Vec3::zeros(), Color::from_hex(0xff0000), &mut world).unwrap();
        let blue = create_object(shape, 1.0, Vec3::zeros(), Color::from_hex(0x0000ff), &mut world).unwrap();

        assert_eq!(red.mesh.material.base_color_hex(), 0xff0000);
        assert_eq!(blue.mesh.material.base_color_hex(), 0x0000ff);
        assert_eq!(red.local_inertia(), blue.local_inertia());
    }

    #[test]
    fn test_sync_mesh_follows_falling_body() {
        let mut world = create_world().unwrap();
        let mut object = create_object(
            ShapeConfiguration::sphere(0.5),
            1.0,
            Vec3::new(0.0, 10.0, 0.0),
            Color::default(),
            &mut world,
        )
        .unwrap();

        world.step_n(30);
        // Not synchronized yet
        assert_eq!(object.mesh.transform.position, Vec3::new(0.0, 10.0, 0.0));

        object.sync_mesh(&world).unwrap();
        let pose = object.body_pose(&world).unwrap();
        assert!(pose.translation.vector.y < 10.0);
        assert_eq!(object.mesh.transform.position, pose.translation.vector);
    }

    #[test]
    fn test_remove_object_deregisters() {
        let mut world = create_world().unwrap();
        let first = create_object_from_config("box", &ObjectConfig::default(), &mut world).unwrap();
        let second = create_object_from_config("sphere", &ObjectConfig::default(), &mut world).unwrap();
        let stale = first.clone();

        let mesh = world.remove_object(first).unwrap();
        assert_eq!(mesh.material.name.as_deref(), Some("box"));
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collider_count(), 1);

        assert_eq!(world.remove_object(stale).unwrap_err(), PhysicsError::UnknownBody);
        assert!(world.contains(second.body_handle()));
    }

    #[test]
    fn test_sync_meshes_reports_stale_objects() {
        let mut world = create_world().unwrap();
        let mut objects = vec![
            create_object_from_config("box", &ObjectConfig::default(), &mut world).unwrap(),
            create_object_from_config("sphere", &ObjectConfig::default(), &mut world).unwrap(),
        ];
        assert!(world.sync_meshes(objects.iter_mut()).is_ok());

        let removed = objects.remove(0);
        let stale = removed.clone();
        world.remove_object(removed).unwrap();
        objects.push(stale);

        assert_eq!(world.sync_meshes(objects.iter_mut()), Err(PhysicsError::UnknownBody));
    }
}
