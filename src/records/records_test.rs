use super::*;

mod dump_lines {
    use super::*;
    #[test]
    fn full_line() {
        let frag = parse_dump_line("000000 01 02 03 04 05 06 07 08  ........").expect("parse error");
        assert_eq!(frag.offset(),0);
        assert_eq!(frag.data(),&[1,2,3,4,5,6,7,8]);
    }
    #[test]
    fn offset_is_hex() {
        let frag = parse_dump_line("0001A8 FF 00 7F 80 a0 Bc 20 41 ...... A").expect("parse error");
        assert_eq!(frag.offset(),0x1a8);
        assert_eq!(frag.data(),&[0xff,0x00,0x7f,0x80,0xa0,0xbc,0x20,0x41]);
    }
    #[test]
    fn final_short_line() {
        let frag = parse_dump_line("000010 48 49 0D                ..HI.").expect("parse error");
        assert_eq!(frag.offset(),16);
        assert_eq!(frag.data(),&[0x48,0x49,0x0d]);
    }
    #[test]
    fn all_slots_blank() {
        let frag = parse_dump_line("000018                         ").expect("parse error");
        assert!(frag.is_empty());
    }
    #[test]
    fn bad_offset() {
        assert!(matches!(parse_dump_line("00G000 01 02 03 04 05 06 07 08 "),Err(Error::BadOffset(_))));
        assert!(matches!(parse_dump_line("+00000 01 02 03 04 05 06 07 08 "),Err(Error::BadOffset(_))));
    }
    #[test]
    fn bad_byte() {
        match parse_dump_line("000000 01 02 0X 04 05 06 07 08 ") {
            Err(Error::BadByte { slot, text, .. }) => {
                assert_eq!(slot,2);
                assert_eq!(text,"0X");
            },
            _ => panic!("expected bad byte")
        }
        // half a blank slot is not a blank slot
        assert!(matches!(parse_dump_line("000000 01  2 03 04 05 06 07 08 "),Err(Error::BadByte { slot: 1, .. })));
    }
    #[test]
    fn byte_after_blank() {
        assert!(matches!(parse_dump_line("000000 01    03 04 05 06 07 08 "),Err(Error::Gap { slot: 1, .. })));
    }
    #[test]
    fn truncated() {
        assert!(matches!(parse_dump_line("0000"),Err(Error::LineTooShort(_))));
        assert!(matches!(parse_dump_line("000000 01 02 03"),Err(Error::LineTooShort(_))));
    }
}

mod ascii_column {
    use super::*;
    const CHECK: ParseOptions = ParseOptions { check_ascii: true };
    #[test]
    fn matching() {
        let frag = DumpFragment::from_dump_line("000000 48 45 4C 4C 4F 0D 20 7E  HELLO. ~",&CHECK).expect("parse error");
        assert_eq!(frag.len(),8);
        DumpFragment::from_dump_line("000008 41 42                     AB",&CHECK).expect("parse error");
        DumpFragment::from_dump_line("000008 41 42                     AB      ",&CHECK).expect("parse error");
    }
    #[test]
    fn mismatched() {
        let line = "000000 48 45 4C 4C 4F 0D 20 7E  HELLX. ~";
        assert!(matches!(DumpFragment::from_dump_line(line,&CHECK),Err(Error::AsciiMismatch(_))));
        // without the option the column is not looked at
        assert!(parse_dump_line(line).is_ok());
    }
}

mod info_lines {
    use super::*;
    #[test]
    fn dfs_line() {
        let info = parse_info_line("$.!BOOT    L  000000 FFFFFF 00000E 002").expect("parse error");
        assert_eq!(info.name(),"$.!BOOT");
        assert_eq!(info.size(),14);
    }
    #[test]
    fn size_is_next_to_last() {
        for hex_size in ["0","8","100","1FFF","abcd"] {
            let line = ["FILE1"," X X ",hex_size," X"].concat();
            let info = parse_info_line(&line).expect("parse error");
            assert_eq!(info.size(),usize::from_str_radix(hex_size,16).unwrap());
            assert_eq!(info.name(),"FILE1");
        }
    }
    #[test]
    fn too_few_fields() {
        assert!(matches!(parse_info_line("LONELY"),Err(Error::MissingFields(_))));
        assert!(matches!(parse_info_line("   "),Err(Error::MissingFields(_))));
    }
    #[test]
    fn bad_size() {
        assert!(matches!(parse_info_line("FILE1 FF1900 FF8023 00001G 002"),Err(Error::BadSize(_))));
    }
}
