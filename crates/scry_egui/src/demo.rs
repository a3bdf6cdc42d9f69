//! A ready-made registry and object graph exercising every property kind,
//! plus a draw-tree node that presents it.
//!
//! Useful for smoke-testing an integration and as a live catalogue of what
//! the drawers render. All state is owned by the [`Demo`] value the caller
//! builds; nothing is global.

use std::rc::Rc;

use scry_reflect::{
    ClassFlags, ClassId, ClassInfo, DelegateBinding, DelegateValue, EnumId, EnumInfo, FieldInfo,
    MapValue, MulticastDelegateValue, ObjectHandle, ParamInfo, PropertyType, SetValue,
    SignatureInfo, SoftClassRef, SoftObjectRef, StructId, StructInfo, TypeRegistry, Value,
};

use crate::inspector::{CustomDrawers, Inspector};
use crate::overlay::{DrawTreeBehavior, DrawTreeNode, NodeTag};

/// The demo world: a registry covering every kind, the custom drawers that
/// go with it, and a populated object graph.
pub struct Demo {
    /// The demo type metadata.
    pub registry: TypeRegistry,
    /// The demo custom drawers (the gadget class draws itself).
    pub custom: CustomDrawers,
    /// The showcase object, a 3-level `Hero : Character : Actor`.
    pub hero: ObjectHandle,
    /// A second object the hero's references point at.
    pub mentor: ObjectHandle,
    /// The base class.
    pub actor_class: ClassId,
    /// The middle class; the only mutable level.
    pub character_class: ClassId,
    /// The most-derived class.
    pub hero_class: ClassId,
    /// The custom-drawn class.
    pub gadget_class: ClassId,
    /// A non-contiguous enum.
    pub damage_kind: EnumId,
    /// A small aggregate struct.
    pub vitals: StructId,
}

fn set_own_field(
    registry: &TypeRegistry,
    object: &ObjectHandle,
    class: ClassId,
    field: &str,
    value: Value,
) {
    let Some(index) = registry
        .class(class)
        .fields()
        .iter()
        .position(|info| info.name() == field)
    else {
        return;
    };
    let mut instance = object.borrow_mut();
    if let Some(slot) = instance
        .level_mut(class)
        .and_then(|level| level.slots_mut().get_mut(index))
    {
        if let Some(slot_value) = slot.value_mut() {
            *slot_value = value;
        }
    }
}

/// Builds the demo registry and object graph.
pub fn build() -> Demo {
    let mut registry = TypeRegistry::new();

    let damage_kind = registry
        .register_enum(EnumInfo::new(
            "DamageKind",
            [("Physical", 0), ("Fire", 3), ("Arcane", 10)],
        ))
        .expect("fresh registry");
    let vitals = registry
        .register_struct(
            StructInfo::new("Vitals")
                .with_field(FieldInfo::new("health", PropertyType::F32))
                .with_field(FieldInfo::new("mana", PropertyType::F32))
                .with_field(FieldInfo::new("regen", PropertyType::U16)),
        )
        .expect("fresh registry");

    let actor_class = registry
        .register_class(
            ClassInfo::new("Actor")
                .with_field(FieldInfo::new("id", PropertyType::U32))
                .with_field(FieldInfo::new("callsign", PropertyType::Name))
                .with_field(FieldInfo::new("active", PropertyType::Bool)),
        )
        .expect("fresh registry");
    let gadget_class = registry
        .register_class(
            ClassInfo::new("Gadget")
                .with_parent(actor_class)
                .with_flags(ClassFlags::CUSTOM_DRAWER)
                .with_field(FieldInfo::new("charge", PropertyType::U8)),
        )
        .expect("fresh registry");

    let on_hit = SignatureInfo::new()
        .with_param(ParamInfo::new("damage", "i32"))
        .with_param(ParamInfo::new("handled", "bool").out())
        .with_return("bool");
    let on_level_up = SignatureInfo::new().with_param(ParamInfo::new("level", "u32"));

    let character_class = registry
        .register_class(
            ClassInfo::new("Character")
                .with_parent(actor_class)
                .with_flags(ClassFlags::MUTABLE)
                .with_field(FieldInfo::new("vitals", PropertyType::Struct(vitals)))
                .with_field(FieldInfo::new("damage_kind", PropertyType::Enum(damage_kind)))
                .with_field(FieldInfo::new(
                    "inventory",
                    PropertyType::Array(Box::new(PropertyType::Str)),
                ))
                .with_field(FieldInfo::new(
                    "stats",
                    PropertyType::Map {
                        key: Box::new(PropertyType::Name),
                        value: Box::new(PropertyType::I32),
                    },
                ))
                .with_field(FieldInfo::new(
                    "faction",
                    PropertyType::Class {
                        parent: actor_class,
                    },
                ))
                .with_field(FieldInfo::new("on_hit", PropertyType::Delegate(on_hit))),
        )
        .expect("fresh registry");
    let hero_class = registry
        .register_class(
            ClassInfo::new("Hero")
                .with_parent(character_class)
                .with_field(FieldInfo::new("title", PropertyType::Text))
                .with_field(FieldInfo::new(
                    "mentor",
                    PropertyType::WeakObject { class: actor_class },
                ))
                .with_field(FieldInfo::new(
                    "home",
                    PropertyType::SoftObject { class: actor_class },
                ))
                .with_field(FieldInfo::new(
                    "banner",
                    PropertyType::SoftClass {
                        parent: actor_class,
                    },
                ))
                .with_field(FieldInfo::new(
                    "crew",
                    PropertyType::Set(Box::new(PropertyType::Str)),
                ))
                .with_field(FieldInfo::new(
                    "gadget",
                    PropertyType::Object { class: gadget_class },
                ))
                .with_field(FieldInfo::new(
                    "on_level_up",
                    PropertyType::MulticastDelegate(on_level_up),
                )),
        )
        .expect("fresh registry");

    let mentor = registry.instantiate(actor_class, "Sage");
    set_own_field(
        &registry,
        &mentor,
        actor_class,
        "callsign",
        Value::Name("sage".to_owned()),
    );

    let hero = registry.instantiate(hero_class, "Protagonist");
    set_own_field(
        &registry,
        &hero,
        character_class,
        "inventory",
        Value::Array(vec![
            Value::Str("sword".to_owned()),
            Value::Str("rope".to_owned()),
        ]),
    );
    set_own_field(
        &registry,
        &hero,
        character_class,
        "stats",
        Value::Map(MapValue::from_pairs(vec![
            (Value::Name("strength".to_owned()), Value::I32(10)),
            (Value::Name("agility".to_owned()), Value::I32(7)),
        ])),
    );
    set_own_field(
        &registry,
        &hero,
        character_class,
        "damage_kind",
        Value::Enum {
            id: damage_kind,
            value: 3,
        },
    );
    set_own_field(
        &registry,
        &hero,
        character_class,
        "faction",
        Value::Class(Some(actor_class)),
    );
    let mut on_hit_value = DelegateValue::new();
    on_hit_value.bind(DelegateBinding::new(&mentor, "on_hit"));
    set_own_field(
        &registry,
        &hero,
        character_class,
        "on_hit",
        Value::Delegate(on_hit_value),
    );

    set_own_field(
        &registry,
        &hero,
        hero_class,
        "title",
        Value::Text("The Bold".to_owned()),
    );
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "mentor",
        Value::WeakObject(Rc::downgrade(&mentor)),
    );
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "home",
        Value::SoftObject(SoftObjectRef::pending("/world/home", Rc::clone(&mentor))),
    );
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "banner",
        Value::SoftClass(SoftClassRef::pending("/classes/Actor", actor_class)),
    );
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "crew",
        Value::Set(SetValue::from_values(vec![
            Value::Str("ana".to_owned()),
            Value::Str("brick".to_owned()),
        ])),
    );
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "gadget",
        Value::Object(Some(registry.instantiate(gadget_class, "Compass"))),
    );
    let mut on_level_up_value = MulticastDelegateValue::new();
    on_level_up_value.add(DelegateBinding::new(&mentor, "on_level_up"));
    on_level_up_value.add(DelegateBinding::new(&hero, "celebrate"));
    set_own_field(
        &registry,
        &hero,
        hero_class,
        "on_level_up",
        Value::MulticastDelegate(on_level_up_value),
    );

    let mut custom = CustomDrawers::new();
    custom.register(gadget_class, |inspector, ui, object| {
        ui.label("A gadget draws itself, then opts back into the defaults:");
        // Forcing default rendering here does not suppress custom drawers
        // deeper in the graph.
        inspector.draw_object(ui, object, false, true);
    });

    Demo {
        registry,
        custom,
        hero,
        mentor,
        actor_class,
        character_class,
        hero_class,
        gadget_class,
        damage_kind,
        vitals,
    }
}

/// A draw-tree node presenting the demo object graph.
pub struct DemoNode {
    hero: ObjectHandle,
}

impl DemoNode {
    /// Presents the given demo's hero.
    pub fn new(demo: &Demo) -> Self {
        Self {
            hero: Rc::clone(&demo.hero),
        }
    }
}

impl DrawTreeNode for DemoNode {
    fn draw_tree_start(
        &mut self,
        inspector: Inspector<'_>,
        ui: &mut egui::Ui,
        _tag: &NodeTag,
    ) -> DrawTreeBehavior {
        inspector.draw_object(ui, &self.hero, true, false);
        DrawTreeBehavior::Continue
    }
}
