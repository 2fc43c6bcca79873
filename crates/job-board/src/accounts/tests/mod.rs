mod directory;
mod validation;
