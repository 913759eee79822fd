use crate::model::lifecycle;
use crate::model::world::World;
use crate::model::SimError;
use oasis_data::{
    AnimalState, Identity, Organism, OrganismBody, OrganismKind, OrganismView, Placement,
    PlantBody, Vitals,
};

/// Components every organism carries, plus its (exactly one) body.
pub type OrganismComponents<'a> = (
    &'a Identity,
    &'a Placement,
    &'a Vitals,
    Option<&'a PlantBody>,
    Option<&'a AnimalState>,
);

pub type AnimalComponents<'a> = (
    &'a Identity,
    &'a mut Placement,
    &'a Vitals,
    &'a mut AnimalState,
);

fn body_of(plant: Option<&PlantBody>, animal: Option<&AnimalState>) -> Option<OrganismBody> {
    match (plant, animal) {
        (Some(p), _) => Some(OrganismBody::Plant(*p)),
        (None, Some(a)) => Some(OrganismBody::Animal(*a)),
        (None, None) => None,
    }
}

impl World {
    /// Organisms that are still alive. Destroyed records awaiting the next
    /// prune are not counted.
    pub fn population_count(&self) -> usize {
        self.ecs
            .query::<&Vitals>()
            .iter()
            .filter(|(_, v)| v.alive)
            .count()
    }

    pub fn count_by_kind(&self, kind: OrganismKind) -> usize {
        self.ecs
            .query::<(&Identity, &Vitals)>()
            .iter()
            .filter(|(_, (i, v))| v.alive && i.kind == kind)
            .count()
    }

    pub fn find(&self, id: uuid::Uuid) -> Option<hecs::Entity> {
        self.ecs
            .query::<&Identity>()
            .iter()
            .find(|(_, i)| i.id == id)
            .map(|(h, _)| h)
    }

    pub fn organism(&self, handle: hecs::Entity) -> Result<Organism, SimError> {
        let mut query = self
            .ecs
            .query_one::<OrganismComponents>(handle)
            .map_err(|_| SimError::StaleHandle)?;
        let (identity, placement, vitals, plant, animal) =
            query.get().ok_or(SimError::StaleHandle)?;
        let body = body_of(plant, animal).ok_or(SimError::UnknownOrganism(identity.id))?;
        Ok(Organism {
            identity: *identity,
            placement: *placement,
            vitals: *vitals,
            body,
        })
    }

    pub fn animal_state(&self, handle: hecs::Entity) -> Result<AnimalState, SimError> {
        match self.organism(handle)? {
            Organism {
                body: OrganismBody::Animal(state),
                ..
            } => Ok(state),
            Organism { identity, .. } => Err(SimError::NotAnAnimal(identity.id)),
        }
    }

    pub fn view(&self, handle: hecs::Entity) -> Result<OrganismView, SimError> {
        self.organism(handle).map(|o| lifecycle::view(&o))
    }

    /// Presentation snapshot of every organism, ordered by identity.
    pub fn views(&self) -> Vec<OrganismView> {
        let mut views: Vec<_> = self
            .ecs
            .query::<OrganismComponents>()
            .iter()
            .filter_map(|(_, (identity, placement, vitals, plant, animal))| {
                let body = body_of(plant, animal)?;
                Some(lifecycle::view_components(identity, placement, vitals, &body))
            })
            .collect();
        views.sort_by_key(|v| v.id);
        views
    }

    /// Number of animals currently asleep.
    pub fn sleeping_count(&self) -> usize {
        self.ecs
            .query::<(&Vitals, &AnimalState)>()
            .iter()
            .filter(|(_, (v, a))| v.alive && a.is_sleeping())
            .count()
    }

    /// SHA-256 over the ordered organism state, for reproducibility checks.
    pub fn deterministic_hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();

        hasher.update(self.tick.to_le_bytes());
        hasher.update(self.clock.elapsed().to_bits().to_le_bytes());
        for view in self.views() {
            hasher.update(view.id.as_bytes());
            for c in view.position.to_array() {
                hasher.update(c.to_bits().to_le_bytes());
            }
            hasher.update(view.heading.to_bits().to_le_bytes());
            for c in view.scale.to_array() {
                hasher.update(c.to_bits().to_le_bytes());
            }
            hasher.update(view.age.to_bits().to_le_bytes());
            hasher.update([view.alive as u8, view.sleeping as u8, view.moving as u8]);
        }

        let mut cells: Vec<_> = self.occupancy.iter().map(|c| (c.cell, c.owner)).collect();
        cells.sort();
        for (cell, owner) in cells {
            hasher.update(cell.x.to_le_bytes());
            hasher.update(cell.z.to_le_bytes());
            hasher.update(owner.as_bytes());
        }

        hex::encode(hasher.finalize())
    }
}
