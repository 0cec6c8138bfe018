//! Parser for PDF structure trees.
//!
//! Parses StructTreeRoot and StructElem dictionaries according to PDF spec Section 14.7.

use super::types::{ParentTree, StructChild, StructElem, StructTreeRoot, StructType};
use crate::document::PdfDocument;
use crate::error::Error;
use crate::object::Object;
use std::collections::HashMap;

/// Helper function to resolve an object (handles both direct objects and references).
fn resolve_object(document: &mut PdfDocument, obj: &Object) -> Result<Object, Error> {
    match obj {
        Object::Reference(obj_ref) => document.load_object(*obj_ref),
        _ => Ok(obj.clone()),
    }
}

/// Parse the structure tree from a PDF document.
///
/// Reads the StructTreeRoot from the document catalog and recursively parses
/// all structure elements.
///
/// # Arguments
/// * `document` - The PDF document
///
/// # Returns
/// * `Ok(Some(StructTreeRoot))` - If the document has a structure tree
/// * `Ok(None)` - If the document is not tagged (no StructTreeRoot)
/// * `Err(Error)` - If parsing fails
pub fn parse_structure_tree(document: &mut PdfDocument) -> Result<Option<StructTreeRoot>, Error> {
    // Get catalog
    let catalog = document.catalog()?;

    // Check for StructTreeRoot in catalog dictionary
    let catalog_dict = catalog
        .as_dict()
        .ok_or_else(|| Error::InvalidPdf("Catalog is not a dictionary".into()))?;

    let struct_tree_root_ref = match catalog_dict.get("StructTreeRoot") {
        Some(obj) => obj,
        None => return Ok(None), // Not a tagged PDF
    };

    // Resolve the StructTreeRoot object
    let struct_tree_root_obj = resolve_object(document, struct_tree_root_ref)?;

    // Parse StructTreeRoot dictionary
    let struct_tree_dict = struct_tree_root_obj
        .as_dict()
        .ok_or_else(|| Error::InvalidPdf("StructTreeRoot is not a dictionary".into()))?;

    let mut struct_tree = StructTreeRoot::new();

    // Parse RoleMap (optional)
    if let Some(role_map_obj) = struct_tree_dict.get("RoleMap") {
        let role_map_obj = resolve_object(document, role_map_obj)?;
        if let Some(role_map_dict) = role_map_obj.as_dict() {
            for (key, value) in role_map_dict.iter() {
                if let Some(name) = value.as_name() {
                    struct_tree.role_map.insert(key.clone(), name.to_string());
                }
            }
        }
    }

    // Parse ParentTree (optional)
    if let Some(parent_tree_obj) = struct_tree_dict.get("ParentTree") {
        let parent_tree = parse_parent_tree(document, parent_tree_obj)?;
        struct_tree.parent_tree = Some(parent_tree);
    }

    // Parse K (children) - can be a single element or array of elements
    if let Some(k_obj) = struct_tree_dict.get("K") {
        let k_obj = resolve_object(document, k_obj)?;

        match k_obj {
            Object::Array(arr) => {
                // Multiple root elements
                for elem_obj in arr {
                    if let Some(elem) =
                        parse_struct_elem(document, &elem_obj, &struct_tree.role_map)?
                    {
                        struct_tree.add_root_element(elem);
                    }
                }
            },
            _ => {
                // Single root element
                if let Some(elem) = parse_struct_elem(document, &k_obj, &struct_tree.role_map)? {
                    struct_tree.add_root_element(elem);
                }
            },
        }
    }

    Ok(Some(struct_tree))
}

/// Parse a structure element (StructElem) from a PDF object.
///
/// # Arguments
/// * `document` - The PDF document
/// * `obj` - The object to parse (should be a dictionary)
/// * `role_map` - RoleMap for custom structure types
///
/// # Returns
/// * `Ok(Some(StructElem))` - Successfully parsed structure element
/// * `Ok(None)` - Not a valid structure element
/// * `Err(Error)` - Parsing error
fn parse_struct_elem(
    document: &mut PdfDocument,
    obj: &Object,
    role_map: &HashMap<String, String>,
) -> Result<Option<StructElem>, Error> {
    let obj = resolve_object(document, obj)?;

    let dict = match obj.as_dict() {
        Some(d) => d,
        None => return Ok(None), // Not a dictionary, skip
    };

    // Check /Type (should be /StructElem, but optional)
    if let Some(type_obj) = dict.get("Type") {
        if let Some(type_name) = type_obj.as_name() {
            if type_name != "StructElem" {
                return Ok(None); // Not a StructElem
            }
        }
    }

    // Get /S (structure type) - REQUIRED
    let s_obj = dict
        .get("S")
        .ok_or_else(|| Error::InvalidPdf("StructElem missing /S".into()))?;
    let s_name = s_obj
        .as_name()
        .ok_or_else(|| Error::InvalidPdf("StructElem /S is not a name".into()))?;

    // Map custom types to standard types using RoleMap
    let struct_type_str = role_map.get(s_name).map(|s| s.as_str()).unwrap_or(s_name);
    let struct_type = StructType::from_str(struct_type_str);

    let mut struct_elem = StructElem::new(struct_type);

    // Get /Pg (page) - optional
    if let Some(_pg_obj) = dict.get("Pg") {
        // Page reference - we'd need to resolve this to a page number
        // For now, skip (requires page tree traversal)
    }

    // Get /A (attributes) - optional
    if let Some(attr_obj) = dict.get("A") {
        let attr_obj = resolve_object(document, attr_obj)?;
        if let Some(attr_dict) = attr_obj.as_dict() {
            for (key, value) in attr_dict.iter() {
                struct_elem.attributes.insert(key.clone(), value.clone());
            }
        }
    }

    // Parse /K (children) - can be:
    // 1. A single integer (MCID)
    // 2. A dictionary (marked content reference with MCID and Pg)
    // 3. An array of any of the above or StructElems
    // 4. Another StructElem (dictionary with /Type /StructElem)
    if let Some(k_obj) = dict.get("K") {
        let k_obj = resolve_object(document, k_obj)?;
        parse_k_children(document, &k_obj, &mut struct_elem, role_map)?;
    }

    Ok(Some(struct_elem))
}

/// Parse the /K entry (children) of a structure element.
fn parse_k_children(
    document: &mut PdfDocument,
    k_obj: &Object,
    parent: &mut StructElem,
    role_map: &HashMap<String, String>,
) -> Result<(), Error> {
    match k_obj {
        Object::Integer(mcid) => {
            // Single MCID
            parent.add_child(StructChild::MarkedContentRef {
                mcid: *mcid as u32,
                page: parent.page.unwrap_or(0), // Use parent's page if available
            });
        },

        Object::Array(arr) => {
            // Array of children
            for child_obj in arr {
                let child_obj = resolve_object(document, child_obj)?;

                match &child_obj {
                    Object::Integer(mcid) => {
                        // MCID
                        parent.add_child(StructChild::MarkedContentRef {
                            mcid: *mcid as u32,
                            page: parent.page.unwrap_or(0),
                        });
                    },

                    Object::Dictionary(_) => {
                        // Could be a StructElem or marked content reference
                        if let Some(child_elem) = parse_struct_elem(document, &child_obj, role_map)?
                        {
                            parent.add_child(StructChild::StructElem(Box::new(child_elem)));
                        } else {
                            // Try parsing as marked content reference
                            if let Some(mcr) = parse_marked_content_ref(&child_obj)? {
                                parent.add_child(mcr);
                            }
                        }
                    },

                    Object::Reference(obj_ref) => {
                        // Object reference to another StructElem
                        parent.add_child(StructChild::ObjectRef(obj_ref.id, obj_ref.gen));
                    },

                    _ => {
                        // Unknown child type, skip
                    },
                }
            }
        },

        Object::Dictionary(_) => {
            // Single dictionary child
            if let Some(child_elem) = parse_struct_elem(document, k_obj, role_map)? {
                parent.add_child(StructChild::StructElem(Box::new(child_elem)));
            } else {
                // Try parsing as marked content reference
                if let Some(mcr) = parse_marked_content_ref(k_obj)? {
                    parent.add_child(mcr);
                }
            }
        },

        Object::Reference(obj_ref) => {
            // Object reference to another StructElem
            parent.add_child(StructChild::ObjectRef(obj_ref.id, obj_ref.gen));
        },

        _ => {
            // Unknown K type
        },
    }

    Ok(())
}

/// Parse a marked content reference dictionary.
///
/// According to PDF spec, a marked content reference has:
/// - /Type /MCR
/// - /Pg - Page containing the marked content
/// - /MCID - Marked content ID
fn parse_marked_content_ref(obj: &Object) -> Result<Option<StructChild>, Error> {
    let dict = match obj.as_dict() {
        Some(d) => d,
        None => return Ok(None),
    };

    // Check for /Type /MCR
    if let Some(type_obj) = dict.get("Type") {
        if let Some(type_name) = type_obj.as_name() {
            if type_name != "MCR" {
                return Ok(None);
            }
        }
    }

    // Get /MCID
    let mcid = dict
        .get("MCID")
        .and_then(|obj| obj.as_integer())
        .ok_or_else(|| Error::InvalidPdf("MCR missing /MCID".into()))?;

    // Get /Pg (page reference)
    // For now, we'll use 0 as placeholder - proper implementation would resolve page reference
    let page = 0; // TODO: Resolve page reference

    Ok(Some(StructChild::MarkedContentRef {
        mcid: mcid as u32,
        page,
    }))
}

/// Parse the ParentTree from a PDF object.
///
/// The ParentTree is a number tree that maps MCIDs to structure elements.
/// For simplicity, we'll build a HashMap representation.
fn parse_parent_tree(document: &mut PdfDocument, obj: &Object) -> Result<ParentTree, Error> {
    let _obj = resolve_object(document, obj)?;

    // ParentTree is a number tree - complex structure
    // For MVP, we'll create an empty parent tree
    // Full implementation would parse the number tree structure
    let parent_tree = ParentTree::new();

    // TODO: Implement full number tree parsing
    // Number trees are defined in PDF spec Section 7.9.7

    Ok(parent_tree)
}
