// Domain layer - Core types shared by ports and adapters

pub mod model;
