use pretty_assertions::assert_eq;
use sicpass::{assemble, first_pass, presets, second_pass, AsmError};

fn copy() -> &'static presets::Preset {
    presets::find("copy").unwrap()
}

#[test]
fn test_copy_pass_one() {
    let preset = copy();
    let (symtab, intermediate) = first_pass(preset.program_text, preset.optab_text).unwrap();

    assert_eq!(
        symtab,
        "ALPHA\t100C\nONE\t100F\nTWO\t1011\nBETA\t1014\n\nProgram Size: 1A\n"
    );
    assert_eq!(
        intermediate,
        "-\tCOPY\tSTART\t1000\n\
         1000\t-\tLDA\tALPHA\n\
         1003\t-\tADD\tONE\n\
         1006\t-\tSUB\tTWO\n\
         1009\t-\tSTA\tBETA\n\
         100C\tALPHA\tBYTE\tC'CSE'\n\
         100F\tONE\tRESB\t2\n\
         1011\tTWO\tWORD\t2\n\
         1014\tBETA\tRESW\t2\n\
         101A\t-\tEND\t-\n"
    );
}

#[test]
fn test_copy_object_code() {
    let preset = copy();
    let (symtab, intermediate) = first_pass(preset.program_text, preset.optab_text).unwrap();
    let object_code = second_pass(&intermediate, &symtab, preset.optab_text).unwrap();

    insta::assert_snapshot!(object_code);
}

#[test]
fn test_sum_object_code() {
    let report = assemble(
        include_str!("../programs/sum.asm"),
        include_str!("../programs/sum.optab"),
    );
    assert_eq!(report.message(), None);
    assert!(report
        .pass_one
        .symtab
        .ends_with("TOTAL\t2039\nMSG\t203C\n\nProgram Size: 40\n"));
    let object_code = report.pass_two.unwrap().object_code;

    for line in object_code.lines().filter(|l| l.starts_with('T')) {
        let length = u8::from_str_radix(line.split('^').nth(2).unwrap(), 16).unwrap();
        assert!(length <= 0x1E);
    }
    insta::assert_snapshot!(object_code);
}

#[test]
fn test_pass_one_is_deterministic() {
    let preset = copy();
    assert_eq!(
        first_pass(preset.program_text, preset.optab_text).unwrap(),
        first_pass(preset.program_text, preset.optab_text).unwrap()
    );
}

#[test]
fn test_locations_advance_by_directive_size() {
    let program = include_str!("../programs/sum.asm");
    let (_, intermediate) = first_pass(program, include_str!("../programs/sum.optab")).unwrap();

    let records = intermediate
        .lines()
        .skip(1)
        .map(|line| line.split('\t').collect::<Vec<_>>())
        .collect::<Vec<_>>();
    for pair in records.windows(2) {
        let here = u32::from_str_radix(pair[0][0], 16).unwrap();
        let next = u32::from_str_radix(pair[1][0], 16).unwrap();
        let expected = match (pair[0][2], pair[0][3]) {
            ("RESW", n) => 3 * n.parse::<u32>().unwrap(),
            ("RESB", n) => n.parse::<u32>().unwrap(),
            ("BYTE", lit) => lit.len() as u32 - 3,
            _ => 3,
        };
        assert_eq!(next - here, expected, "after {:?}", pair[0]);
    }
}

#[test]
fn test_undefined_symbol_emits_nothing() {
    let report = assemble("P START 0\n- LDA GAMMA\n- END P", "LDA 00");
    assert!(report.pass_one.is_ok());
    let pass_two = report.pass_two.unwrap();
    assert_eq!(pass_two.message, "Error! Undefined symbol: 'GAMMA' found.");
    assert!(pass_two.object_code.is_empty());
}

#[test]
fn test_duplicate_label_has_no_partial_symtab() {
    let report = assemble("P START 0\nX WORD 1\nX WORD 2\n- END P", "LDA 00");
    assert_eq!(report.pass_one.message, "Error! Duplicate label: X found.");
    assert!(report.pass_one.symtab.is_empty());
    assert!(report.pass_two.is_none());
}

#[test]
fn test_empty_inputs() {
    assert!(matches!(
        second_pass("", "A 0", "LDA 00"),
        Err(AsmError::EmptyInput(_))
    ));
    assert!(matches!(
        second_pass("-\tP\tSTART\t0", "A 0", ""),
        Err(AsmError::EmptyInput(_))
    ));
    assert_eq!(
        assemble("P START 0\n- END P", "").message(),
        Some("Error! Operation table is empty.")
    );
}
