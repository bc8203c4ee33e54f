pub mod aura;
