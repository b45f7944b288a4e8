use indoc::indoc;

// Help text template with placeholder
pub const HELP_TEMPLATE: &str = indoc! {r#"
    Assignments:
      key=value              string value
      key:int=-42            signed integer
      key:uint=42            unsigned integer
      key:float=1.5          64-bit float (key:f32=1.5 for 32-bit)
      key:bool=true          boolean
      key:time=2024-01-02T03:04:05Z
                             RFC 3339 timestamp
      key:null               null value
      key:strs=a,b,c         string slice (also key:ints=, key:uints=)
      key:json=[1,2,3]       any supported JSON value

    The kind is whatever follows the last ':' before '='. A key that itself
    contains ':' needs an explicit kind: write a:b:str=c, not a:b=c.

    Repeating a key overwrites it; the old record stays in the buffer as a
    tombstone.

    Examples:
      # Printing the store as JSON
      %BINARY_NAME% json name=kaban version:uint=3 tags:strs=fast,typed

      # Writing gzipped JSON to a file
      %BINARY_NAME% json --gzip out.json.gz name=kaban

      # Reading one key back
      %BINARY_NAME% get version version:uint=3

      # Inspecting the raw buffer after an overwrite
      %BINARY_NAME% dump a:int=1 a:int=2

      # Displaying buffer statistics
      %BINARY_NAME% --capacity 4k info a=x a=y b:bool=true
"#};
