use std::collections::{BTreeSet, VecDeque};

use automapper::mapping::ConverterRegistry;
use automapper::{MapperConfig, MapperError, Mappable, Value, converter, typed};
use chrono::NaiveDate;

use crate::utils::{
    EnderecoDto, PersonRecord, PersonSummary, PessoaDto, PessoaViewModel, SealedSummary, date,
    engine, sample_pessoa,
};

#[test]
fn test_declarative_pessoa_mapping() {
    let engine = engine();
    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();

    let view = mapper.map(&sample_pessoa()).unwrap();

    assert_eq!(view.nome, "Leandro Rocha");
    assert_eq!(view.data_nascimento, "22/09/1999");
    assert_eq!(view.endereco.logradouro, "Rua das Flores");
    assert_eq!(view.endereco.numero, 123);
    assert_eq!(
        view.telefones,
        VecDeque::from(vec!["11 99999-0000".to_string(), "11 3333-4444".to_string()])
    );
    // Ignored on the source side
    assert_eq!(view.score, 0);
}

#[test]
fn test_renamed_and_converted_scenario() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    let date_to_text = engine
        .converters()
        .get(ConverterRegistry::DATE_TO_TEXT)
        .unwrap();
    mapper
        .configure_renames([
            ("nome_completo", "nome"),
            ("dt_nascimento", "data_nascimento"),
        ])
        .set_converter("dt_nascimento", date_to_text);

    let summary = mapper
        .map(&PersonRecord {
            nome_completo: "Leandro Rocha".to_string(),
            dt_nascimento: date(1999, 9, 22),
            score: 98.5,
        })
        .unwrap();

    assert_eq!(
        summary,
        PersonSummary {
            nome: "Leandro Rocha".to_string(),
            data_nascimento: "22/09/1999".to_string(),
            score: 98,
        }
    );
}

#[test]
fn test_ignored_field_keeps_zero_value() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    mapper.rename("nome_completo", "nome").ignore("score");

    for score in [0.0, 98.5, -12.75, f64::MAX] {
        let summary = mapper
            .map(&PersonRecord {
                score,
                ..PersonRecord::default()
            })
            .unwrap();
        assert_eq!(summary.score, 0);
    }
}

#[test]
fn test_ignore_wins_over_converters() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    mapper
        .set_ad_hoc_converter("score", converter(|_| Ok(Value::Int(7))))
        .ignore("score");

    let summary = mapper.map(&PersonRecord::default()).unwrap();
    assert_eq!(summary.score, 0);
}

#[test]
fn test_ad_hoc_converter_beats_named_converter() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    mapper
        .rename("nome_completo", "nome")
        .set_ad_hoc_converter("nome_completo", typed(|name: String| Ok(name.to_uppercase())))
        .set_converter("nome_completo", typed(|name: String| Ok(name.to_lowercase())));

    let summary = mapper
        .map(&PersonRecord {
            nome_completo: "Maria Silva".to_string(),
            ..PersonRecord::default()
        })
        .unwrap();
    assert_eq!(summary.nome, "MARIA SILVA");
}

#[test]
fn test_named_converter_beats_builtin_rules() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    // f64 -> i32 would truncate; the converter rounds instead
    mapper.set_converter("score", typed(|score: f64| Ok(score.round() as i32)));

    let summary = mapper
        .map(&PersonRecord {
            score: 98.5,
            ..PersonRecord::default()
        })
        .unwrap();
    assert_eq!(summary.score, 99);
}

#[test]
fn test_converter_failure_names_the_field() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    mapper.set_converter(
        "score",
        converter(|_| Err(anyhow::anyhow!("score out of range"))),
    );

    let err = mapper.map(&PersonRecord::default()).unwrap_err();
    match err {
        MapperError::Conversion { field, source } => {
            assert_eq!(field, "score");
            assert_eq!(source.to_string(), "score out of range");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unparseable_date_aborts_mapping() {
    #[derive(Debug, Default, Mappable)]
    struct TextDate {
        day: String,
    }
    #[derive(Debug, Default, Mappable)]
    struct TypedDate {
        day: NaiveDate,
    }

    let engine = engine();
    let mapper = engine.create_mapper::<TextDate, TypedDate>().unwrap();

    assert_eq!(
        mapper
            .map(&TextDate {
                day: "22/09/1999".to_string()
            })
            .unwrap()
            .day,
        date(1999, 9, 22)
    );
    assert_eq!(
        mapper
            .map(&TextDate {
                day: "1999-09-22".to_string()
            })
            .unwrap()
            .day,
        date(1999, 9, 22)
    );

    let err = mapper
        .map(&TextDate {
            day: "not a date".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, MapperError::Conversion { ref field, .. } if field == "day"));
    assert!(err.to_string().contains("not a date"));
}

#[test]
fn test_numeric_coercions() {
    #[derive(Debug, Default, Mappable)]
    struct Wide {
        small: i32,
        ratio: f64,
        count: Option<i64>,
        level: i16,
    }
    #[derive(Debug, Default, Mappable)]
    struct Narrow {
        small: i64,
        ratio: i32,
        count: f32,
        level: Option<f64>,
    }

    let engine = engine();
    let mapper = engine.create_mapper::<Wide, Narrow>().unwrap();
    let narrow = mapper
        .map(&Wide {
            small: i32::MIN,
            ratio: -7.9,
            count: Some(3),
            level: 12,
        })
        .unwrap();

    assert_eq!(narrow.small, i64::from(i32::MIN));
    assert_eq!(narrow.ratio, -7);
    assert!((narrow.count - 3.0).abs() < f32::EPSILON);
    assert_eq!(narrow.level, Some(12.0));
}

#[test]
fn test_absent_source_values_are_skipped() {
    #[derive(Debug, Default, Mappable)]
    struct Partial {
        nome: Option<String>,
        score: Option<i32>,
    }

    let engine = engine();
    let mapper = engine.create_mapper::<Partial, PersonSummary>().unwrap();
    let summary = mapper.map(&Partial::default()).unwrap();
    assert_eq!(summary, PersonSummary::default());

    let summary = mapper
        .map(&Partial {
            nome: Some("Ana".to_string()),
            score: None,
        })
        .unwrap();
    assert_eq!(summary.nome, "Ana");
    assert_eq!(summary.score, 0);
}

#[test]
fn test_unmatched_source_fields_are_dropped() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();
    // No renames: only `score` matches by name
    let summary = mapper
        .map(&PersonRecord {
            nome_completo: "Ana".to_string(),
            dt_nascimento: date(2000, 1, 1),
            score: 5.0,
        })
        .unwrap();
    assert_eq!(summary.nome, "");
    assert_eq!(summary.data_nascimento, "");
    assert_eq!(summary.score, 5);
}

#[test]
fn test_collections_are_copied_into_target_kind() {
    #[derive(Debug, Default, Mappable)]
    struct Tagged {
        tags: Vec<String>,
        ids: BTreeSet<i32>,
    }
    #[derive(Debug, Default, Mappable)]
    struct TagSet {
        tags: BTreeSet<String>,
        ids: Vec<i32>,
    }

    let engine = engine();
    let mapper = engine.create_mapper::<Tagged, TagSet>().unwrap();
    let mapped = mapper
        .map(&Tagged {
            tags: vec!["b".into(), "a".into(), "b".into()],
            ids: BTreeSet::from([3, 1, 2]),
        })
        .unwrap();

    assert_eq!(mapped.tags, BTreeSet::from(["a".to_string(), "b".to_string()]));
    assert_eq!(mapped.ids, vec![1, 2, 3]);

    let empty = mapper.map(&Tagged::default()).unwrap();
    assert!(empty.tags.is_empty());
    assert!(empty.ids.is_empty());
}

#[test]
fn test_collection_elements_are_not_converted() {
    #[derive(Debug, Default, Mappable)]
    struct Numbers {
        values: Vec<i32>,
    }
    #[derive(Debug, Default, Mappable)]
    struct Labels {
        values: Vec<String>,
    }

    let engine = engine();
    let mapper = engine.create_mapper::<Numbers, Labels>().unwrap();
    let err = mapper
        .map(&Numbers {
            values: vec![1, 2],
        })
        .unwrap_err();
    // The copied i32 elements cannot be decoded as strings
    assert!(matches!(err, MapperError::Conversion { ref field, .. } if field == "values"));
}

#[test]
fn test_nested_mapping_uses_the_nested_pair_configuration() {
    let engine = engine();
    let nested = engine
        .create_mapper::<EnderecoDto, crate::utils::EnderecoViewModel>()
        .unwrap();
    nested.set_ad_hoc_converter(
        "logradouro",
        typed(|street: String| Ok(format!("{street} (verified)"))),
    );

    let mapper = engine.create_mapper::<PessoaDto, PessoaViewModel>().unwrap();
    let view = mapper.map(&sample_pessoa()).unwrap();
    assert_eq!(view.endereco.logradouro, "Rua das Flores (verified)");
}

#[test]
fn test_missing_default_constructor() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, SealedSummary>()
        .unwrap();
    let err = mapper.map(&PersonRecord::default()).unwrap_err();
    assert!(matches!(
        err,
        MapperError::Construction { ref type_name } if type_name == SealedSummary::schema_name()
    ));
    assert_eq!(
        err.to_string(),
        format!("Type {} must have a default constructor", SealedSummary::schema_name())
    );
}

#[test]
fn test_map_option_and_map_all() {
    let engine = engine();
    let mapper = engine
        .create_mapper::<PersonRecord, PersonSummary>()
        .unwrap();

    assert!(mapper.map_option(None).unwrap().is_none());
    let some = mapper
        .map_option(Some(&PersonRecord {
            score: 1.0,
            ..PersonRecord::default()
        }))
        .unwrap();
    assert_eq!(some.map(|s| s.score), Some(1));

    let all = mapper
        .map_all(&[PersonRecord::default(), PersonRecord::default()])
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn test_inherited_fields_are_mapped() {
    #[derive(Debug, Default, Mappable)]
    struct Entity {
        id: i64,
        created: NaiveDate,
    }
    #[derive(Debug, Default, Mappable)]
    struct Customer {
        nome: String,
        #[mapping(base)]
        entity: Entity,
    }
    #[derive(Debug, Default, Mappable)]
    struct CustomerView {
        id: i64,
        nome: String,
        created: String,
    }

    let engine = engine();
    let descriptor = engine.describe(Customer::schema_ref());
    let names: Vec<_> = descriptor.field_names().collect();
    assert_eq!(names, vec!["nome", "id", "created"]);

    let mapper = engine.create_mapper::<Customer, CustomerView>().unwrap();
    let view = mapper
        .map(&Customer {
            nome: "Ana".to_string(),
            entity: Entity {
                id: 42,
                created: date(2024, 2, 29),
            },
        })
        .unwrap();
    assert_eq!(view.id, 42);
    assert_eq!(view.nome, "Ana");
    assert_eq!(view.created, "29/02/2024");

    // And back into the composed struct
    let reverse = engine.create_mapper::<CustomerView, Customer>().unwrap();
    let customer = reverse.map(&view).unwrap();
    assert_eq!(customer.entity.id, 42);
    assert_eq!(customer.entity.created, date(2024, 2, 29));
}

#[test]
fn test_strict_mode_rejects_unsupported_pairs() {
    #[derive(Debug, Default, Mappable)]
    struct Flag {
        active: bool,
    }
    #[derive(Debug, Default, Mappable)]
    struct FlagText {
        active: String,
    }

    crate::utils::init_logging();
    let engine = automapper::AutoMapper::with_config(MapperConfig {
        strict_conversions: true,
        ..MapperConfig::default()
    });
    let mapper = engine.create_mapper::<Flag, FlagText>().unwrap();
    let err = mapper.map(&Flag { active: true }).unwrap_err();
    match err {
        MapperError::UnsupportedConversion { field, from, to } => {
            assert_eq!(field, "active");
            assert_eq!(from, "bool");
            assert_eq!(to, "String");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_depth_guard_stops_deep_graphs() {
    #[derive(Debug, Default, Mappable)]
    struct Node {
        value: i32,
        next: Option<Box<Node>>,
    }
    #[derive(Debug, Default, Mappable)]
    struct NodeView {
        value: i32,
        next: Option<Box<NodeView>>,
    }

    fn chain(len: i32) -> Node {
        (0..len).rev().fold(Node::default(), |next, value| Node {
            value,
            next: Some(Box::new(next)),
        })
    }

    crate::utils::init_logging();
    let engine = automapper::AutoMapper::with_config(MapperConfig {
        max_depth: 8,
        ..MapperConfig::default()
    });
    let mapper = engine.create_mapper::<Node, NodeView>().unwrap();

    let shallow = mapper.map(&chain(3)).unwrap();
    assert_eq!(shallow.value, 0);
    assert_eq!(shallow.next.as_ref().map(|n| n.value), Some(1));

    let err = mapper.map(&chain(20)).unwrap_err();
    assert!(matches!(err, MapperError::DepthExceeded { max_depth: 8 }));
}
