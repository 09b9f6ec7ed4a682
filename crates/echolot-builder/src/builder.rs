//! Provenance record construction

use crate::error::BuildError;
use crate::template::template;
use echolot_domain::{
    vocab, AttributedTo, DerivedFrom, IriRef, NormalizedRecord, ProvenanceRecord, SourceField,
    TypedLiteral,
};
use tracing::debug;

/// Fields that must be present for a record to be constructed, in the order
/// they are checked
pub const REQUIRED_FIELDS: [SourceField; 10] = [
    SourceField::Identifier,
    SourceField::Title,
    SourceField::Creator,
    SourceField::Date,
    SourceField::RightsText,
    SourceField::Format,
    SourceField::ContentUrl,
    SourceField::ProvenanceAgentId,
    SourceField::ProvenanceAgentLabel,
    SourceField::GeneratedAt,
];

/// Construct a provenance record from a normalized source.
///
/// # Errors
///
/// Returns [`BuildError::MissingRequiredField`] naming the first absent
/// mandatory field, checked in [`REQUIRED_FIELDS`] order.
pub fn construct(record: NormalizedRecord) -> Result<ProvenanceRecord, BuildError> {
    if let Some(field) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|field| record.get(*field).is_none())
    {
        return Err(BuildError::MissingRequiredField { field });
    }

    let NormalizedRecord {
        identifier,
        title,
        creator,
        date,
        rights_text,
        license_url,
        format,
        content_url,
        provenance_agent_id,
        provenance_agent_label,
        generated_at,
    } = record;

    let content_url = require(content_url, SourceField::ContentUrl)?;
    let base = template().clone();

    let record = ProvenanceRecord {
        context: base.context,
        types: base.types,
        id: require(identifier, SourceField::Identifier)?,
        title: require(title, SourceField::Title)?,
        creator: require(creator, SourceField::Creator)?,
        date: require(date, SourceField::Date)?,
        rights: require(rights_text, SourceField::RightsText)?,
        format: require(format, SourceField::Format)?,
        license: license_url.map(|id| IriRef { id }),
        // The source entity is the downloaded binary, not the landing page.
        derived_from: DerivedFrom {
            id: content_url.clone(),
            entity_type: vocab::PROV_ENTITY.to_string(),
            description: vocab::DERIVED_FROM_DESCRIPTION.to_string(),
        },
        content_url,
        attributed_to: AttributedTo {
            id: require(provenance_agent_id, SourceField::ProvenanceAgentId)?,
            agent_type: vocab::PROV_AGENT.to_string(),
            name: require(provenance_agent_label, SourceField::ProvenanceAgentLabel)?,
        },
        generated_at: TypedLiteral {
            value: require(generated_at, SourceField::GeneratedAt)?,
            datatype: vocab::XSD_DATE_TIME.to_string(),
        },
    };

    debug!(id = %record.id, licensed = record.license.is_some(), "Constructed provenance record");
    Ok(record)
}

fn require(value: Option<String>, field: SourceField) -> Result<String, BuildError> {
    value.ok_or(BuildError::MissingRequiredField { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> NormalizedRecord {
        NormalizedRecord {
            identifier: Some("https://commons.wikimedia.org/wiki/File:Demo.jpg".to_string()),
            title: Some("Demo Asset".to_string()),
            creator: Some("Jane Doe".to_string()),
            date: Some("2024".to_string()),
            rights_text: Some("CC BY 4.0".to_string()),
            license_url: Some("https://creativecommons.org/licenses/by/4.0/".to_string()),
            format: Some("image/jpeg".to_string()),
            content_url: Some("https://upload.wikimedia.org/demo.jpg".to_string()),
            provenance_agent_id: Some("https://commons.wikimedia.org".to_string()),
            provenance_agent_label: Some("Wikimedia Commons".to_string()),
            generated_at: Some("2024-01-01T00:00:00Z".to_string()),
        }
    }

    #[test]
    fn test_construct_complete_record() {
        let record = construct(complete_record()).unwrap();

        assert_eq!(record.id, "https://commons.wikimedia.org/wiki/File:Demo.jpg");
        assert_eq!(record.title, "Demo Asset");
        assert_eq!(record.types, vec!["edm:ProvidedCHO", "schema:CreativeWork"]);
        assert_eq!(
            record.license,
            Some(IriRef {
                id: "https://creativecommons.org/licenses/by/4.0/".to_string()
            })
        );
        assert_eq!(record.generated_at.datatype, "xsd:dateTime");
        assert_eq!(record.attributed_to.agent_type, "prov:Agent");
        assert_eq!(record.attributed_to.name, "Wikimedia Commons");
    }

    #[test]
    fn test_derived_from_uses_content_url() {
        let record = construct(complete_record()).unwrap();
        assert_eq!(record.derived_from.id, "https://upload.wikimedia.org/demo.jpg");
        assert_ne!(record.derived_from.id, record.id);
        assert_eq!(record.derived_from.entity_type, "prov:Entity");
        assert_eq!(
            record.derived_from.description,
            "Downloaded binary from the source catalog"
        );
    }

    #[test]
    fn test_missing_title_is_named() {
        let mut source = complete_record();
        source.title = None;
        assert_eq!(
            construct(source).unwrap_err(),
            BuildError::MissingRequiredField {
                field: SourceField::Title
            }
        );
    }

    #[test]
    fn test_first_missing_field_reported() {
        let mut source = complete_record();
        source.format = None;
        source.generated_at = None;
        let err = construct(source).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field 'format' in source record");
    }

    #[test]
    fn test_every_required_field_is_enforced() {
        for field in REQUIRED_FIELDS {
            let mut source = complete_record();
            match field {
                SourceField::Identifier => source.identifier = None,
                SourceField::Title => source.title = None,
                SourceField::Creator => source.creator = None,
                SourceField::Date => source.date = None,
                SourceField::RightsText => source.rights_text = None,
                SourceField::Format => source.format = None,
                SourceField::ContentUrl => source.content_url = None,
                SourceField::ProvenanceAgentId => source.provenance_agent_id = None,
                SourceField::ProvenanceAgentLabel => source.provenance_agent_label = None,
                SourceField::GeneratedAt => source.generated_at = None,
                SourceField::LicenseUrl => unreachable!(),
            }
            assert_eq!(
                construct(source).unwrap_err(),
                BuildError::MissingRequiredField { field }
            );
        }
    }

    #[test]
    fn test_missing_license_is_not_fatal() {
        let mut source = complete_record();
        source.license_url = None;
        let record = construct(source).unwrap();
        assert!(record.license.is_none());
    }

    #[test]
    fn test_records_do_not_share_state() {
        let mut first = construct(complete_record()).unwrap();
        first.types.push("prov:Entity".to_string());
        first.context.schema = "urn:mutated".to_string();

        let second = construct(complete_record()).unwrap();
        assert_eq!(second.types.len(), 2);
        assert_eq!(second.context.schema, "http://schema.org/");
    }
}
