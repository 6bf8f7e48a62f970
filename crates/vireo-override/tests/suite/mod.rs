mod equivalence;
mod erasure;
mod scope;
