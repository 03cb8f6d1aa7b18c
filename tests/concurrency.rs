//! Concurrent member resolution.
//!
//! Queries from many threads against one registry must agree on a single cached result per
//! (type, kind) pair.

use std::sync::Arc;

use rayon::prelude::*;
use reflectscope::{prelude::*, Result};

fn build_chain(registry: &Arc<TypeRegistry>, depth: usize) -> Result<Vec<CilTypeRc>> {
    let string = registry.get_primitive(CilPrimitiveKind::String)?;
    let mut chain: Vec<CilTypeRc> = Vec::with_capacity(depth);

    for level in 0..depth {
        let mut builder = TypeBuilder::new(registry.clone())
            .class("Contoso.Chain", &format!("Level{level}"))
            .property(
                PropertyBuilder::new()
                    .name("Shared")
                    .property_type(&string)
                    .public(),
            )
            .property(
                PropertyBuilder::new()
                    .name(format!("Own{level}"))
                    .property_type(&string)
                    .public(),
            )
            .field(
                FieldBuilder::new()
                    .name(format!("field{level}"))
                    .field_type(&string)
                    .internal(),
            );
        if let Some(parent) = chain.last() {
            builder = builder.extends(parent);
        }
        chain.push(builder.build()?);
    }

    Ok(chain)
}

#[test]
fn test_parallel_queries_share_one_result() -> Result<()> {
    let registry = Arc::new(TypeRegistry::new()?);
    let chain = build_chain(&registry, 8)?;
    let leaf = chain.last().cloned().unwrap();

    let results: Vec<Arc<ReflectedMembers>> = (0..256)
        .into_par_iter()
        .map(|_| registry.reflect(&leaf, MemberKind::PUBLIC))
        .collect();

    let first = &results[0];
    assert!(results.iter().all(|result| Arc::ptr_eq(result, first)));

    // One `Shared` (from the leaf) plus one `Own{n}` per level
    assert_eq!(first.properties().len(), 9);
    assert_eq!(first.properties()[0].name, "Shared");
    assert!(first.properties()[0].declaring_type.is(&leaf));
    Ok(())
}

#[test]
fn test_parallel_queries_over_many_keys() -> Result<()> {
    let registry = Arc::new(TypeRegistry::new()?);
    let chain = build_chain(&registry, 6)?;
    let kinds = [
        MemberKind::PUBLIC,
        MemberKind::INTERNAL,
        MemberKind::PUBLIC | MemberKind::INTERNAL,
        MemberKind::PUBLIC | MemberKind::STATIC,
    ];

    let keys: Vec<(CilTypeRc, MemberKind)> = chain
        .iter()
        .flat_map(|ty| kinds.iter().map(move |kind| (ty.clone(), *kind)))
        .collect();

    (0..16).into_par_iter().for_each(|_| {
        keys.par_iter().for_each(|(ty, kind)| {
            let members = registry.get_members(ty, *kind);
            if kind.contains(MemberKind::STATIC) {
                assert!(members.is_empty());
            }
        });
    });

    assert_eq!(registry.reflector_cache().len(), keys.len());

    for (depth, ty) in chain.iter().enumerate() {
        let fields = registry.get_fields(ty, MemberKind::INTERNAL);
        assert_eq!(fields.len(), depth + 1);
    }
    Ok(())
}
