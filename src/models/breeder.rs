use crate::models::{Crossover, Genotype, Morphology, Mutagen};

pub(crate) struct Breeder<'a> {
    crossover: &'a Crossover,
    mutagen: &'a Mutagen,
    morphology: &'a Morphology,
}

impl<'a> Breeder<'a> {
    pub(crate) fn new(
        crossover: &'a Crossover,
        mutagen: &'a Mutagen,
        morphology: &'a Morphology,
    ) -> Self {
        Self {
            crossover,
            mutagen,
            morphology,
        }
    }

    fn breed_child(
        &self,
        parent1: &Genotype,
        parent2: &Genotype,
        next_generation_id: u32,
        progress: f64,
        rng: &mut impl rand::Rng,
    ) -> Genotype {
        let genome = self.crossover.apply(rng, parent1, parent2, self.morphology);
        let mut child = Genotype::new(genome, next_generation_id);

        self.mutagen.mutate(rng, &mut child, self.morphology, progress);

        child
    }

    pub(crate) fn breed_batch(
        &self,
        parent_pairs: &[(usize, usize)],
        candidates: &[Genotype],
        next_generation_id: u32,
        progress: f64,
        rng: &mut impl rand::Rng,
    ) -> Vec<Genotype> {
        parent_pairs
            .iter()
            .map(|&(i, j)| {
                self.breed_child(
                    &candidates[i],
                    &candidates[j],
                    next_generation_id,
                    progress,
                    rng,
                )
            })
            .collect()
    }
}
