mod element;

pub use element::XmlElement;
