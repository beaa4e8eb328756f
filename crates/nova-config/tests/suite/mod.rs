mod discovery;
mod eclipse_section;
